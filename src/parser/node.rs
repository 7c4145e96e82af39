//! Generic labeled parse tree
//!
//! The parser does not build Lisp values directly. It produces a tree of
//! [`ParseNode`]s tagged with the grammar rules that matched, and the
//! reader in [`crate::interp::read`] turns that tree into values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag of the top-level wrapper node
pub const ROOT_TAG: &str = ">";
/// Tag of the zero-width start/end anchors around a form
pub const ANCHOR_TAG: &str = "regex";
/// Tag of bracket characters inside a group
pub const CHAR_TAG: &str = "char";
pub const NUMBER_TAG: &str = "expr|number|regex";
pub const BOOLEAN_TAG: &str = "expr|boolean|string";
pub const SYMBOL_TAG: &str = "expr|symbol|regex";
pub const SEXP_TAG: &str = "expr|sexp|>";
pub const QEXP_TAG: &str = "expr|qexp|>";

/// A node of the parse tree: a rule tag, the matched text, and children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseNode {
    pub tag: String,
    pub contents: String,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    /// A childless node
    pub fn leaf(tag: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            contents: contents.into(),
            children: Vec::new(),
        }
    }

    /// A node with children and no text of its own
    pub fn branch(tag: impl Into<String>, children: Vec<ParseNode>) -> Self {
        Self {
            tag: tag.into(),
            contents: String::new(),
            children,
        }
    }

    /// Wrap a single form between start and end anchors
    pub fn root(form: ParseNode) -> Self {
        Self::branch(
            ROOT_TAG,
            vec![
                Self::leaf(ANCHOR_TAG, ""),
                form,
                Self::leaf(ANCHOR_TAG, ""),
            ],
        )
    }

    pub fn is_root(&self) -> bool {
        self.tag == ROOT_TAG
    }

    /// Total number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ParseNode::node_count).sum::<usize>()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        if self.children.is_empty() {
            writeln!(f, "{} '{}'", self.tag, self.contents)?;
        } else {
            writeln!(f, "{} ", self.tag)?;
            for child in &self.children {
                child.write_indented(f, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count() {
        let node = ParseNode::root(ParseNode::leaf(NUMBER_TAG, "1"));
        assert_eq!(node.node_count(), 4);
    }

    #[test]
    fn test_display_indents_children() {
        let node = ParseNode::root(ParseNode::leaf(SYMBOL_TAG, "x"));
        assert_eq!(
            node.to_string(),
            "> \n  regex ''\n  expr|symbol|regex 'x'\n  regex ''\n"
        );
    }
}
