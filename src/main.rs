use anyhow::{Context, Result};
use arithon::calculator::evaluate_expression;
use arithon::{Config, Session};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arithon")]
#[command(about = "A keystroke-driven scientific calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: $XDG_CONFIG_HOME/arithon/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a raw expression, e.g. "(2 + 3) × 4"
    Eval {
        expression: String,
    },

    /// Feed a whitespace-separated key script through a fresh session
    Keys {
        /// Keys such as: 12 + sin 30 ) =
        script: String,

        /// Print a JSON snapshot instead of the rendered panel
        #[arg(long)]
        json: bool,
    },

    /// Interactive session reading one key script per line
    Repl,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Eval { expression } => {
            let result = evaluate_expression(&expression);
            println!("{}", result.display());
            if let Some(error) = result.error() {
                warn!(%error, "Evaluation failed");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Keys { script, json } => {
            let mut session = Session::new(&config);
            session.run_script(&script)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            } else {
                println!("{}", session.render());
            }
        }
        Commands::Repl => run_repl(Session::new(&config))?,
    }

    Ok(ExitCode::SUCCESS)
}

const REPL_HELP: &str = "\
Type keys separated by spaces (e.g. `12 + sin 30 ) =`), or a command:
  :history     toggle the history panel
  :recall N    recall history entry N
  :copy        copy the result to the clipboard
  :theme       toggle light/dark theme
  :layout      toggle portrait/landscape layout
  :memory      show the memory register
  :help        show this help
  :quit        exit";

fn run_repl(mut session: Session) -> Result<()> {
    info!("Starting interactive session");
    println!("{REPL_HELP}");
    println!("{}", session.render());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }
        let line = line.trim();

        if let Some(command) = line.strip_prefix(':') {
            let mut parts = command.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("quit" | "q"), _) => break,
                (Some("help"), _) => println!("{REPL_HELP}"),
                (Some("history"), _) => session.presentation_mut().toggle_history(),
                (Some("theme"), _) => session.presentation_mut().toggle_theme(),
                (Some("layout"), _) => session.presentation_mut().toggle_layout(),
                (Some("memory"), _) => println!("M = {}", session.builder().state().memory),
                (Some("copy"), _) => match session.copy() {
                    Ok(()) => println!("Copied {}", session.builder().display()),
                    Err(e) => println!("{e}"),
                },
                (Some("recall"), Some(index)) => match index.parse::<usize>() {
                    Ok(index) if session.recall(index) => {}
                    _ => println!("No history entry {index}"),
                },
                _ => println!("Unknown command: {line}"),
            }
        } else if !line.is_empty()
            && let Err(e) = session.run_script(line)
        {
            println!("{e}");
            continue;
        }

        println!("{}", session.render());
    }

    Ok(())
}
