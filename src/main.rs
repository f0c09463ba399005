use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tokend::cli::Outcome;
use tokend::{RunContext, Result};

/// Conventional name of the design-tool export file
const DEFAULT_BATCH: &str = "tokens-export.json";

#[derive(Parser)]
#[command(name = "tokend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Design-token governance for compiled stylesheets", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the token architecture of the compiled stylesheet (dry run)
    Validate {
        /// Explicit stylesheet path (default: first existing candidate)
        #[arg(long)]
        stylesheet: Option<PathBuf>,

        /// Output the report in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Diff an external token export against local tokens (dry run)
    Diff {
        /// Path to the export file
        #[arg(default_value = DEFAULT_BATCH)]
        batch: PathBuf,

        /// Explicit stylesheet path
        #[arg(long)]
        stylesheet: Option<PathBuf>,
    },

    /// Review an external token export and merge approved changes
    Apply {
        /// Path to the export file
        #[arg(default_value = DEFAULT_BATCH)]
        batch: PathBuf,

        /// Accept all NEW/MODIFIED entries without prompting (never removes)
        #[arg(short, long)]
        non_interactive: bool,

        /// Scope generated fragments to [data-theme="<NAME>"]
        #[arg(short, long)]
        scope: Option<String>,

        /// Force global :root scoping
        #[arg(short, long, conflicts_with = "scope")]
        global: bool,

        /// Directory for generated artifacts
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Explicit stylesheet path
        #[arg(long)]
        stylesheet: Option<PathBuf>,
    },

    /// Show a summary of the override registry
    Status,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(outcome) => std::process::exit(outcome.code()),
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let ctx = RunContext::load(std::env::current_dir()?)?;

    match cli.command {
        Commands::Validate { stylesheet, json } => {
            tokend::cli::validate::run(&ctx, stylesheet.as_deref(), json)
        }

        Commands::Diff { batch, stylesheet } => {
            tokend::cli::diff::run(&ctx, &batch, stylesheet.as_deref())
        }

        Commands::Apply {
            batch,
            non_interactive,
            scope,
            global,
            out_dir,
            stylesheet,
        } => {
            let opts = tokend::cli::apply::ApplyOptions {
                non_interactive,
                scope,
                global,
                out_dir,
                stylesheet,
            };
            tokend::cli::apply::run(&ctx, &batch, &opts)
        }

        Commands::Status => tokend::cli::status::run(&ctx),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tokend", &mut io::stdout());
            Ok(Outcome::Clean)
        }
    }
}
