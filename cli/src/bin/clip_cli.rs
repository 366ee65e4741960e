use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use splitting::{FailurePolicy, NameTemplate};
use std::path::PathBuf;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a video into clips at the listed timestamps
    Split {
        /// Path to the source video
        #[arg(short, long)]
        input: PathBuf,
        /// Path to the YAML timestamp file (start time: label)
        #[arg(short, long)]
        timestamps: PathBuf,
        /// Directory the clips are written to
        #[arg(short, long)]
        output_dir: PathBuf,
        /// Output name template with {index} and {label} placeholders
        #[arg(long, default_value = NameTemplate::DEFAULT)]
        template: String,
        /// What to do when a single clip fails (continue, abort)
        #[arg(long, default_value_t = FailurePolicy::Continue)]
        on_error: FailurePolicy,
    },
    /// Show the planned clips without cutting anything
    Plan {
        /// Path to the source video
        #[arg(short, long)]
        input: PathBuf,
        /// Path to the YAML timestamp file (start time: label)
        #[arg(short, long)]
        timestamps: PathBuf,
        /// Output name template with {index} and {label} placeholders
        #[arg(long, default_value = NameTemplate::DEFAULT)]
        template: String,
        /// Print the plans as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the total duration of a video
    Probe {
        /// Path to the source video
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Write an example timestamp file
    Init {
        /// Where to write the example file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Split {
            input,
            timestamps,
            output_dir,
            template,
            on_error,
        } => cli::split(input, timestamps, output_dir, template, *on_error),
        Commands::Plan {
            input,
            timestamps,
            template,
            json,
        } => cli::plan(input, timestamps, template, *json),
        Commands::Probe { input } => cli::probe(input),
        Commands::Init { output } => cli::init(output),
    }
}
