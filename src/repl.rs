//! Interactive read-eval-print loop

use miette::{IntoDiagnostic, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::config::Config;
use crate::diagnostics;
use crate::interp::{Interpreter, Value, read};
use crate::{lexer, parser};

/// Outcome of feeding one line to the REPL
#[derive(Debug)]
pub enum LineOutcome {
    /// Nothing to evaluate
    Blank,
    /// The line did not lex or parse; carries the rendered diagnostic
    Syntax(String),
    /// The line evaluated to a value (possibly an error value)
    Value(Value),
}

pub struct Repl {
    config: Config,
    interpreter: Interpreter,
}

impl Repl {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            interpreter: Interpreter::new(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Lex, parse, read and evaluate one line against the session's root frame
    pub fn eval_line(&self, line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Blank;
        }

        let node = match lexer::lex(line).and_then(|tokens| parser::parse(&tokens, line)) {
            Ok(node) => node,
            Err(e) => {
                tracing::debug!(kind = e.kind(), "syntax error");
                return LineOutcome::Syntax(diagnostics::render(e));
            }
        };

        if self.config.show_tree {
            print!("{}", node);
        }

        let form = read(&node);
        if self.config.echo_input {
            println!("Input:");
            println!("{}", form);
        }

        let result = self.interpreter.eval(form);
        if self.config.echo_input {
            println!("Output:");
        }
        LineOutcome::Value(result)
    }

    /// Run until end of input
    pub fn run(&mut self) -> Result<()> {
        println!("Welcome to gLenISP Version {}", crate::VERSION);
        println!("You have 1000 parentheses remaining");
        println!("Press Ctrl+d to Exit");
        println!();

        let mut editor = DefaultEditor::new().into_diagnostic()?;
        if let Some(path) = &self.config.history_file {
            if let Err(e) = editor.load_history(path) {
                tracing::debug!("no history loaded from {:?}: {}", path, e);
            }
        }

        loop {
            match editor.readline(&self.config.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.as_str()).into_diagnostic()?;
                    }
                    match self.eval_line(&line) {
                        LineOutcome::Blank => {}
                        LineOutcome::Syntax(report) => eprintln!("{}", report),
                        LineOutcome::Value(value) => println!("{}", value),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e).into_diagnostic(),
            }
        }

        if let Some(path) = &self.config.history_file {
            if let Err(e) = editor.save_history(path) {
                tracing::warn!("failed to save history to {:?}: {}", path, e);
            }
        }
        Ok(())
    }
}
