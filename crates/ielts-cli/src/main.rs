mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ielts",
    version,
    about = "Rebuild the passage and questions of IELTS Reading test PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one PDF into a passage and its questions
    Parse {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Write the parsed test to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom JSON profile (default: builtin academic profile)
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Parse and check every PDF in a directory
    Batch {
        /// Directory containing PDF files
        dir: PathBuf,

        /// Process at most this many files
        #[arg(long, value_name = "N")]
        max: Option<usize>,

        /// Show details for passing files too
        #[arg(long)]
        verbose: bool,

        /// Save all per-file results to a JSON file
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Custom JSON profile (default: builtin academic profile)
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },
    /// Inspect and validate keyword profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the builtin profile as JSON
    Show,
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            profile,
        } => commands::parse::run(input_file, &output, out, profile),
        Commands::Batch {
            dir,
            max,
            verbose,
            json,
            profile,
        } => match commands::batch::run(&dir, max, verbose, json, profile) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
