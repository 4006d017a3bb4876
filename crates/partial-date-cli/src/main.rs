use anyhow::Result;
use clap::{Parser, Subcommand};
use partial_date::{PartialDateOptions, DEFAULT_UNKNOWN_YEAR};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "partial-date",
    version,
    about = "Parse, format, and derive partial dates",
    long_about = "Work with calendar dates whose year, month, or day may be unknown.\n\
                  Notations: YYYY-MM-DD, YYYY-MM, YYYY, --MM-DD. Pass notations that \
                  start with '-' after a '--' separator."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Year stored in place of an unknown year
    #[arg(
        long,
        env = "PARTIAL_DATE_UNKNOWN_YEAR",
        default_value_t = DEFAULT_UNKNOWN_YEAR,
        global = true
    )]
    unknown_year: i32,

    /// Years below this are treated as unknown when deriving from a single date
    #[arg(long, env = "PARTIAL_DATE_YEAR_CUTOFF", global = true)]
    year_cutoff: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a notation and print the stored (date, precision) pair as JSON
    Parse(commands::Parse),
    /// Print the notation for a stored (date, precision) pair
    Format(commands::Format),
    /// Derive a partial date from bounding dates or a single known date
    Derive(commands::Derive),
    /// Combine a start and end notation into one range string
    Range(commands::Range),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = PartialDateOptions {
        unknown_year: cli.unknown_year,
        year_cutoff: cli.year_cutoff,
    };
    tracing::debug!(?options, "resolved options");

    match cli.command {
        Commands::Parse(cmd) => cmd.execute(&options),
        Commands::Format(cmd) => cmd.execute(),
        Commands::Derive(cmd) => cmd.execute(&options),
        Commands::Range(cmd) => cmd.execute(&options),
    }
}
