//! odoo-tuner: sizing recommendations for an Odoo systemd service.
//!
//! Reads TUNER_* variables (or a .env file); flags override them.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use odoo_tuner_cli::{
    init_tracing, pick_service, print_report, process_exit_code, summarize_error, write_report,
    OutputFormat, Report,
};
use odoo_tuner_core::{recommend, LogLevel, MetricsCollector, TunerConfig, TunerError};
use odoo_tuner_infra::{ServiceDiscovery, SystemCollector};

#[derive(Parser, Debug)]
#[command(name = "odoo-tuner", about = "Recommend Odoo and systemd limits for this host")]
struct Cli {
    /// systemd unit to inspect; skips discovery
    #[arg(long)]
    service: Option<String>,

    /// Substring used to discover candidate units (default: odoo)
    #[arg(long)]
    pattern: Option<String>,

    /// Write the JSON report to this file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the collected facts before the recommendations
    #[arg(long)]
    show_facts: bool,

    /// Fail instead of prompting when several units match
    #[arg(long)]
    non_interactive: bool,

    /// Debug logging, including every command run
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = TunerConfig::from_env().context("Failed to load configuration")?;
    if let Some(service) = cli.service {
        config.service = Some(service);
    }
    if let Some(pattern) = cli.pattern {
        config.service_pattern = pattern;
    }
    config.validate()?;

    let service = match config.service.clone() {
        Some(service) => service,
        None => {
            let candidates = ServiceDiscovery::from_config(&config)
                .list_services(&config.service_pattern)
                .await
                .map_err(TunerError::from)?;
            pick_service(
                candidates,
                !cli.non_interactive,
                std::io::stdin().lock(),
                std::io::stderr(),
            )
            .map_err(TunerError::from)?
        }
    };
    tracing::debug!(service = %service, "Using service");

    let facts = SystemCollector::from_config(&config)
        .collect(&service)
        .await
        .map_err(TunerError::from)
        .with_context(|| format!("Failed to collect facts for {}", service))?;
    let recommendations = recommend(&facts)?;
    let report = Report::new(facts, recommendations);

    let mut stdout = std::io::stdout().lock();
    if let Some(path) = &cli.output {
        write_report(path, &report)?;
        let message = format!("Recommendations written to {}", path.display());
        match cli.format {
            OutputFormat::Json => eprintln!("{}", message),
            OutputFormat::Text => {
                writeln!(stdout, "{}", message).context("Failed to write output")?
            }
        }
    }

    print_report(&mut stdout, &report, cli.format, cli.show_facts)
        .context("Failed to write output")?;

    Ok(())
}

fn report_error(err: &anyhow::Error) -> ExitCode {
    let summary = summarize_error(err);
    let code = summary.error_code;

    match summary.log_level {
        LogLevel::Debug => tracing::debug!(error_code = code, "Run aborted"),
        LogLevel::Warn => tracing::warn!(error_code = code, "Run failed"),
        LogLevel::Error => tracing::error!(error_code = code, "Run failed"),
    }

    eprintln!("Error: {:#}", err);
    if let Some(hint) = summary.hint {
        eprintln!("Hint: {}", hint);
    }

    ExitCode::from(process_exit_code(&summary))
}
