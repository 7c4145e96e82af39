//! gLenISP CLI
//!
//! Main entry point for the `glenisp` command.

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use glenisp::config::Config;
use glenisp::interp::{Interpreter, Value, read};
use glenisp::repl::Repl;

#[derive(Parser)]
#[command(name = "glenisp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "gLenISP, a small Lisp interpreter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ./glenisp.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL (default)
    Repl {
        /// Print each form and its result under `Input:` / `Output:`
        #[arg(long)]
        echo: bool,

        /// Print the parse tree of every line
        #[arg(long)]
        show_tree: bool,

        /// History file
        #[arg(long, value_name = "FILE")]
        history: Option<PathBuf>,
    },

    /// Evaluate every form in a file
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Parse a file without evaluating it
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the parse trees as JSON
        #[arg(long)]
        show_tree: bool,
    },

    /// Show information about the interpreter
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Repl {
        echo: false,
        show_tree: false,
        history: None,
    }) {
        Commands::Repl {
            echo,
            show_tree,
            history,
        } => repl(config, echo, show_tree, history),

        Commands::Run { input } => run(&input),

        Commands::Check { input, show_tree } => check(&input, show_tree),

        Commands::Info => info(),
    }
}

fn repl(mut config: Config, echo: bool, show_tree: bool, history: Option<PathBuf>) -> Result<()> {
    config.echo_input |= echo;
    config.show_tree |= show_tree;
    if history.is_some() {
        config.history_file = history;
    }
    tracing::debug!(?config, "starting repl");
    Repl::new(config).run()
}

fn read_source(input: &Path) -> Result<String> {
    std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))
}

fn run(input: &Path) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = read_source(input)?;
    let name = input.to_string_lossy();

    let tokens = glenisp::lexer::lex_named(&name, &source)?;
    let forms = glenisp::parser::parse_program_named(&name, &tokens, &source)?;
    tracing::debug!("Parsed {} forms", forms.len());

    let interpreter = Interpreter::new();
    for node in &forms {
        let result = interpreter.eval(read(node));
        // Definitions and other unit results stay quiet
        match &result {
            Value::Sexp(items) if items.is_empty() => {}
            _ => println!("{}", result),
        }
    }
    Ok(())
}

fn check(input: &Path, show_tree: bool) -> Result<()> {
    tracing::info!("Checking {:?}", input);

    let source = read_source(input)?;
    let name = input.to_string_lossy();

    let tokens = glenisp::lexer::lex_named(&name, &source)?;
    let forms = glenisp::parser::parse_program_named(&name, &tokens, &source)?;

    if show_tree {
        let json = serde_json::to_string_pretty(&forms)
            .map_err(|e| miette::miette!("Failed to serialize parse tree: {}", e))?;
        println!("{}", json);
    }

    println!("{}: {} forms parsed", input.display(), forms.len());
    Ok(())
}

fn info() -> Result<()> {
    println!("gLenISP");
    println!("Version: {}", glenisp::VERSION);
    println!();
    println!("Builtins:");
    let names: Vec<&str> = glenisp::interp::builtins::BUILTINS
        .iter()
        .map(|(name, _)| *name)
        .collect();
    println!("  {}", names.join(" "));
    Ok(())
}
