use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_add_command, handle_analyze_command, handle_list_command, AddArgs, AnalyzeArgs,
};
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker",
    long_about = "Record day-to-day expenses into a CSV file and analyze them by \
                  type, payment method, person and date, from the command line \
                  or an interactive terminal interface."
)]
struct Cli {
    /// Use this data file instead of the default expenses.csv
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense
    Add(AddArgs),

    /// Filter and summarize recorded expenses
    Analyze(AnalyzeArgs),

    /// List every recorded expense
    #[command(alias = "ls")]
    List,

    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?.with_data_file(cli.file);
    let is_tui = matches!(cli.command, Some(Commands::Tui));

    if is_tui {
        paths.ensure_directories()?;
        init_logger(cli.log_level, Some(paths.log_file()))?;
    } else {
        init_logger(cli.log_level, None)?;
    }
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths)?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add_command(&storage, &settings, args)?,
        Some(Commands::Analyze(args)) => handle_analyze_command(&storage, &settings, args)?,
        Some(Commands::List) => handle_list_command(&storage, &settings)?,
        Some(Commands::Tui) => expense_tracker::tui::run_tui(&storage, &settings)?,
        Some(Commands::Config { init }) => {
            let paths = storage.paths();
            if init {
                settings.save(paths)?;
                println!("Wrote settings to: {}", paths.settings_file().display());
                println!();
            }
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data file:      {}", paths.data_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("TUI log file:   {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  People:          {}", settings.people.join(", "));
        }
        None => {
            println!("Expense Tracker - record and analyze day-to-day expenses");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses tui' to launch the interactive interface.");
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this crate only.
/// With a log file, output goes there without colors so the TUI screen stays
/// clean.
fn init_logger(level: LevelFilter, log_file: Option<PathBuf>) -> Result<()> {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
