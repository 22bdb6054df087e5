#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use alarm_analyzer::analyze_cmd::{AnalyzeOptions, DEFAULT_PREVIEW_LIMIT};
use alarm_analyzer::config::load_config;
use alarm_analyzer::{AlarmClass, EnabledStatus, FilterCriteria, InterlockFilter, SourceFiles};
use alarm_analyzer::{analyze_cmd, health_cmd};

#[derive(Parser, Debug)]
#[command(name = "alarm-analyzer")]
#[command(about = "Review, filter and export PLC alarm/interlock records", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set ALARM_ANALYZER_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    /// TOML config file ([service] and [export] tables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract, filter, summarize and optionally export alarm records
    Analyze {
        /// PLC configuration export (.L5K)
        #[arg(long, value_name = "FILE")]
        plc: Option<PathBuf>,
        /// Base equipment CSV
        #[arg(long, value_name = "FILE")]
        base: Option<PathBuf>,
        /// Extraction service base URL (overrides config and environment)
        #[arg(long)]
        service_url: Option<String>,
        /// Case-insensitive substring over the text fields
        #[arg(long, default_value = "")]
        search: String,
        /// Alarm class to keep (HH, H, L, LL, other); repeatable
        #[arg(long = "alarm-type", value_name = "CLASS")]
        alarm_types: Vec<AlarmClass>,
        /// all | enabled | disabled
        #[arg(long, default_value = "all")]
        enabled: EnabledStatus,
        /// all | yes | no
        #[arg(long, default_value = "all")]
        interlock: InterlockFilter,
        /// Write the filtered rows in the source column order
        #[arg(long, value_name = "FILE")]
        export_original: Option<PathBuf>,
        /// Write the filtered rows in the display layout
        #[arg(long, value_name = "FILE")]
        export_display: Option<PathBuf>,
        /// Write machine-readable JSON report to this file
        #[arg(long)]
        json: Option<PathBuf>,
        /// Number of rows to preview on stdout
        #[arg(long, default_value_t = DEFAULT_PREVIEW_LIMIT)]
        limit: usize,
    },

    /// Check that the extraction service is up
    Health {
        /// Extraction service base URL (overrides config and environment)
        #[arg(long)]
        service_url: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("ALARM_ANALYZER_LOG").unwrap_or_else(|_| {
        if verbose { "alarm_analyzer=debug".to_string() } else { "alarm_analyzer=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Analyze {
            plc,
            base,
            service_url,
            search,
            alarm_types,
            enabled,
            interlock,
            export_original,
            export_display,
            json,
            limit,
        } => {
            if let Some(url) = service_url {
                config.service.base_url = url;
            }
            let options = AnalyzeOptions {
                files: SourceFiles { plc_export: plc, base_csv: base },
                criteria: FilterCriteria::new()
                    .with_search(search)
                    .with_alarm_types(alarm_types)
                    .with_enabled_status(enabled)
                    .with_interlock(interlock),
                export_original,
                export_display,
                json,
                limit,
            };
            analyze_cmd::run(&config, &options).context("analyze failed")?;
            Ok(())
        }
        Commands::Health { service_url } => {
            if let Some(url) = service_url {
                config.service.base_url = url;
            }
            health_cmd::run(&config).context("health check failed")?;
            Ok(())
        }
    }
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
