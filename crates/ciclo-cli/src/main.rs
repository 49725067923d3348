use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "ciclo")]
#[command(about = "Work-cycle calendar generator", long_about = None)]
struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Year the allowed generation window is centred on (default: current year)
    #[arg(long, global = true)]
    reference_year: Option<i32>,

    /// Fail instead of warn when the config has keys the calendar does not read
    #[arg(long, global = true, default_value_t = false)]
    strict_keys: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Where the calendar configuration comes from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Layered YAML config paths in merge order (base -> overrides)
    #[arg(
        long = "config",
        num_args = 1..,
        required_unless_present = "envelope",
        conflicts_with = "envelope"
    )]
    pub config_paths: Vec<String>,

    /// Saved envelope JSON (`{ version, savedAt, data }`)
    #[arg(long)]
    pub envelope: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Build and validate the configuration without generating
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Generate the calendar for the configured year
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Also write calendar_report.json (days + statistics) into this directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print year statistics as JSON
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print vacation periods with overlapping and adjacent ranges merged
    MergeVacations {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Save the merged configuration as a versioned envelope
    Snapshot {
        /// Layered YAML config paths in merge order
        #[arg(long = "config", required = true, num_args = 1..)]
        config_paths: Vec<String>,

        /// Output envelope path
        #[arg(long)]
        out: PathBuf,

        /// Timestamp to record (RFC 3339). Defaults to now.
        #[arg(long)]
        saved_at: Option<DateTime<Utc>>,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let opts = commands::GlobalOpts {
        reference_year: cli.reference_year,
        strict_keys: cli.strict_keys,
    };

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = ciclo_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Validate { source } => commands::calendar::validate(&opts, &source)?,

        Commands::Generate {
            source,
            format,
            out,
        } => commands::calendar::generate(&opts, &source, format, out.as_deref())?,

        Commands::Stats { source } => commands::calendar::stats(&opts, &source)?,

        Commands::MergeVacations { source } => {
            commands::calendar::merge_vacations(&opts, &source)?
        }

        Commands::Snapshot {
            config_paths,
            out,
            saved_at,
        } => commands::snapshot::run(&config_paths, &out, saved_at.unwrap_or_else(Utc::now))?,
    }

    Ok(())
}
