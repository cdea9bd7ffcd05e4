use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use brain_analytics::{
    BrainReport, BrainStore, DEFAULT_BRAIN, DEFAULT_LIMIT, ReportParams, default_db_path,
};

/// Timezone for datetime display
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum TzOption {
    /// Use local timezone
    #[default]
    Local,
    /// Use UTC (Zulu time)
    Utc,
}

#[derive(Parser)]
#[command(name = "brain-analytics", version)]
#[command(about = "Health and usage report for a neural memory brain", long_about = None)]
struct Cli {
    /// Name of the brain to analyze
    #[arg(long, env = "NMEM_BRAIN", default_value = DEFAULT_BRAIN)]
    brain: String,

    /// Path to the database file (default: ~/.neuralmemory/brains/<brain>.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Maximum number of rows in each ranking section
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Output in JSON format (default is the text report)
    #[arg(long)]
    json: bool,

    /// Timezone for the report timestamp (default: local)
    #[arg(long, value_enum)]
    tz: Option<TzOption>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| default_db_path(&cli.brain));
    debug!(path = %db_path.display(), brain = %cli.brain, "opening brain database");

    let params = ReportParams {
        limit: cli.limit,
        ..ReportParams::default()
    };

    // The store (and its connection) is dropped when this scope ends,
    // whether or not the report succeeds.
    let store = BrainStore::open(&db_path)?;
    let report = BrainReport::generate(&store, &cli.brain, &params)?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        let use_local = matches!(cli.tz.unwrap_or_default(), TzOption::Local);
        println!("{}", report.render(use_local));
    }

    Ok(())
}
