//! Interactive read-eval-print loop

use std::fs;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::{render, CliError, Mode};

pub fn run() -> Result<(), CliError> {
    print_banner();

    let mut rl = DefaultEditor::new()?;
    let history_path = dirs::data_dir().map(|p| p.join("msdscript").join("history.txt"));

    if let Some(path) = &history_path {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        if rl.load_history(path).is_err() {
            debug!(path = %path.display(), "no history loaded");
        }
    }

    loop {
        let prompt = format!("{} ", "msd›".cyan());

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if line.starts_with(':') {
                    if !handle_command(line) {
                        break;
                    }
                    continue;
                }

                show(render(line, Mode::Interp));
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".cyan());
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = &history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

/// Run a `:command`; returns false when the loop should stop.
fn handle_command(line: &str) -> bool {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, Some(arg.trim())),
        None => (line, None),
    };

    let mode = match command {
        ":help" | ":h" | ":?" => {
            print_help();
            return true;
        }
        ":quit" | ":q" => return false,
        ":print" | ":p" => Mode::Print,
        ":pretty" | ":pp" => Mode::PrettyPrint,
        ":ast" => Mode::Ast,
        _ => {
            eprintln!("{}: unknown command {}", "Error".red().bold(), command);
            return true;
        }
    };

    match arg {
        Some(source) if !source.is_empty() => show(render(source, mode)),
        _ => eprintln!("Usage: {} <expression>", command),
    }
    true
}

fn show(result: Result<String, CliError>) {
    match result {
        Ok(text) => println!("{}", text.green()),
        Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
    }
}

fn print_banner() {
    println!("{}", "MSDscript".cyan().bold());
    println!("  Type {} for help, {} to quit\n", ":help".yellow(), ":quit".yellow());
}

fn print_help() {
    println!(
        "{}",
        "
Commands:
  :help, :h, :?      Show this help
  :quit, :q          Exit REPL
  :print <expr>      Show the canonical form
  :pretty <expr>     Show the pretty form
  :ast <expr>        Show the parsed tree as JSON

Anything else is evaluated, e.g.
  _let f = _fun (x) x * x _in f(7)
"
        .dimmed()
    );
}
