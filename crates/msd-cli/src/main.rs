//! MSDscript CLI and REPL
//!
//! Usage:
//!   msdscript --interp < prog.msd        - Evaluate, print the value
//!   msdscript --print < prog.msd         - Print the canonical form
//!   msdscript --pretty-print < prog.msd  - Print the pretty form
//!   msdscript -e <expr>                  - Evaluate expression
//!   msdscript                            - Start REPL (interactive terminal)

mod repl;

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use msd_ast::prelude::*;
use msd_eval::prelude::*;
use msd_parse::prelude::*;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "msdscript")]
#[command(version)]
#[command(about = "The MSDscript expression language", long_about = None)]
#[command(group(ArgGroup::new("mode").args(["interp", "print", "pretty_print", "ast"])))]
struct Args {
    /// Program file; stdin is read when neither a file nor -e is given
    #[arg()]
    file: Option<PathBuf>,

    /// Program text
    #[arg(short, long)]
    eval: Option<String>,

    /// Evaluate the program and print its value
    #[arg(long)]
    interp: bool,

    /// Print the program in canonical form
    #[arg(long)]
    print: bool,

    /// Print the program in pretty form
    #[arg(long = "pretty-print")]
    pretty_print: bool,

    /// Print the parsed tree as JSON
    #[arg(long)]
    ast: bool,

    /// Trace every evaluation step to stderr
    #[arg(short, long)]
    trace: bool,
}

/// What to do with a parsed program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Interp,
    Print,
    PrettyPrint,
    Ast,
}

impl Args {
    fn mode(&self) -> Option<Mode> {
        if self.interp {
            Some(Mode::Interp)
        } else if self.print {
            Some(Mode::Print)
        } else if self.pretty_print {
            Some(Mode::PrettyPrint)
        } else if self.ast {
            Some(Mode::Ast)
        } else {
            None
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Eval(#[from] EvalError),

    #[error("{0}")]
    Ser(#[from] SerError),

    #[error("cannot read {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("line editor: {0}")]
    Repl(#[from] rustyline::error::ReadlineError),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.trace);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let mode = args.mode();
    let source = match (&args.eval, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?,
        (None, None) => {
            if mode.is_none() && io::stdin().is_terminal() {
                return repl::run();
            }
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|source| CliError::Io {
                path: "stdin".to_string(),
                source,
            })?;
            text
        }
    };

    let output = render(&source, mode.unwrap_or(Mode::Interp))?;
    println!("{}", output);
    Ok(())
}

/// Parse `source` and produce the text `mode` asks for
fn render(source: &str, mode: Mode) -> Result<String, CliError> {
    let expr = parse(source)?;
    debug!(?mode, "parsed program");
    Ok(match mode {
        Mode::Interp => expr.interp()?.to_string(),
        Mode::Print => expr.to_string(),
        Mode::PrettyPrint => expr.to_pretty_string(),
        Mode::Ast => ser::to_json(&expr)?,
    })
}
