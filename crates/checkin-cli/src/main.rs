//! Check-in CLI - operator commands for an entry terminal

use anyhow::Result;
use checkin::CheckinError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "checkin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the store (entry.db)
    #[arg(short, long, default_value = "./data")]
    db_path: PathBuf,

    /// JSON terminal config ({"store": {...}, "scan": {...}}); overrides --db-path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Scan policy flags, applied on top of the config file
#[derive(clap::Args, Clone, Default)]
pub struct ScanArgs {
    /// Only accept payloads for this event name
    #[arg(short, long)]
    event: Option<String>,

    /// Refuse re-entry of already admitted participants
    #[arg(long)]
    no_re_entry: bool,

    /// Reject ids below this number
    #[arg(long)]
    min_id: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check payloads ("event,id"); reads one per line from stdin if none given
    Scan {
        payloads: Vec<String>,

        #[command(flatten)]
        policy: ScanArgs,

        /// Print outcomes as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Show admission totals and the latest log entries
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Show the log entries of one participant
    History { id: String },

    /// Wipe the registry and log, then register ids START..=END
    Init {
        start: u64,
        end: u64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete the access log and reset every participant to not entered
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Write the access log as CSV
    Export {
        /// Destination file; without it the export is cancelled
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix a UTF-8 byte-order mark for spreadsheet apps
        #[arg(long)]
        bom: bool,

        /// Comma-separated column order, e.g. "participant_id,timestamp,type"
        #[arg(long)]
        columns: Option<String>,
    },

    /// Open the folder containing the store
    OpenFolder,

    /// Store location and tuning
    Status,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("{}", user_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let terminal = commands::load_config(&cli.db_path, cli.config.as_deref())?;

    match cli.command {
        Commands::Scan {
            payloads,
            policy,
            json,
        } => commands::scan::execute(&terminal, payloads, &policy, json),
        Commands::Stats { json } => commands::stats::execute(&terminal, json),
        Commands::History { id } => commands::stats::history(&terminal, &id),
        Commands::Init { start, end, force } => {
            commands::maintenance::initialize(&terminal, start, end, force)
        }
        Commands::Clear { force } => commands::maintenance::clear(&terminal, force),
        Commands::Export {
            output,
            bom,
            columns,
        } => commands::export::execute(&terminal, output, bom, columns.as_deref()),
        Commands::OpenFolder => commands::status::open_folder(&terminal),
        Commands::Status => commands::status::execute(&terminal),
    }
}

/// Operator-facing text: store detail stays in the log
fn user_message(err: &anyhow::Error) -> String {
    match err.chain().find_map(|e| e.downcast_ref::<CheckinError>()) {
        Some(checkin_err) => checkin_err.user_message(),
        None => format!("{}", err),
    }
}
