//! Reader: parse tree to values

use crate::parser::{ANCHOR_TAG, ParseNode};

use super::error::EvalError;
use super::value::Value;

/// Convert a parse tree into a value tree.
///
/// Failures are returned as [`Value::Error`] like every other failure the
/// core reports.
pub fn read(node: &ParseNode) -> Value {
    if node.is_root() {
        return match node.children.iter().find(|child| !ignored(child)) {
            Some(form) => read(form),
            None => Value::sexp(),
        };
    }

    let tag = node.tag.as_str();
    if tag.contains("number") {
        return read_number(&node.contents);
    }
    if tag.contains("boolean") {
        return match node.contents.as_str() {
            "#t" => Value::Boolean(true),
            "#f" => Value::Boolean(false),
            _ => Value::Error(EvalError::MalformedNode(format!(
                "{} '{}'",
                node.tag, node.contents
            ))),
        };
    }
    if tag.contains("symbol") {
        return Value::Symbol(node.contents.clone());
    }

    let items: Vec<Value> = node
        .children
        .iter()
        .filter(|child| !ignored(child))
        .map(read)
        .collect();

    if tag.contains("sexp") {
        Value::Sexp(items)
    } else if tag.contains("qexp") {
        Value::Qexp(items)
    } else {
        Value::Error(EvalError::MalformedNode(node.tag.clone()))
    }
}

fn read_number(contents: &str) -> Value {
    match contents.parse::<i64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Error(EvalError::BadNumber(contents.to_string())),
    }
}

/// Brackets and anchors carry no value
fn ignored(node: &ParseNode) -> bool {
    matches!(node.contents.as_str(), "(" | ")" | "{" | "}") || node.tag == ANCHOR_TAG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{NUMBER_TAG, SYMBOL_TAG};

    #[test]
    fn test_overflow_is_bad_number() {
        let node = ParseNode::leaf(NUMBER_TAG, "99999999999999999999");
        assert_eq!(
            read(&node).as_error(),
            Some(&EvalError::BadNumber("99999999999999999999".to_string()))
        );
    }

    #[test]
    fn test_unknown_tag() {
        let node = ParseNode::branch("string", vec![]);
        assert_eq!(
            read(&node).as_error(),
            Some(&EvalError::MalformedNode("string".to_string()))
        );
    }

    #[test]
    fn test_root_unwrapped() {
        let node = ParseNode::root(ParseNode::leaf(SYMBOL_TAG, "head"));
        assert_eq!(read(&node), Value::Symbol("head".to_string()));
    }
}
