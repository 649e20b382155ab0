pub mod exit;
pub mod output;
pub mod report;
pub mod selection;

pub use exit::{process_exit_code, summarize_error, ExitSummary};
pub use output::{print_report, OutputFormat};
pub use report::{render_facts, render_text, write_report, Report};
pub use selection::{choose_service, pick_service};

/// Initialize tracing for the CLI binary.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `verbose`.
/// Logs go to stderr so stdout only carries the report.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
