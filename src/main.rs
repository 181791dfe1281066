use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use submission_docs::Result;

#[derive(Parser)]
#[command(name = "submission-docs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate field documentation from a DSpace submission form", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one page (and vocabulary file) per submission form field
    Build(submission_docs::cli::build::BuildArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build(args) => {
            submission_docs::cli::build::run(args)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "submission-docs", &mut io::stdout());
        }
    }

    Ok(())
}
