//! Mapping a failed run to an exit code and operator hint.

use odoo_tuner_core::{ErrorMetadata, LogLevel, TunerError};

const UNEXPECTED_ERROR_CODE: &str = "UNEXPECTED_ERROR";
const UNEXPECTED_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitSummary {
    pub error_code: &'static str,
    pub exit_code: i32,
    pub hint: Option<&'static str>,
    pub log_level: LogLevel,
}

/// Find the first `TunerError` in the chain, looking through any context
/// layers. Anything else is reported as unexpected.
pub fn summarize_error(err: &anyhow::Error) -> ExitSummary {
    match err.chain().find_map(|cause| cause.downcast_ref::<TunerError>()) {
        Some(tuner) => ExitSummary {
            error_code: tuner.error_code(),
            exit_code: tuner.exit_code(),
            hint: tuner.suggested_action(),
            log_level: tuner.log_level(),
        },
        None => ExitSummary {
            error_code: UNEXPECTED_ERROR_CODE,
            exit_code: UNEXPECTED_EXIT_CODE,
            hint: None,
            log_level: LogLevel::Error,
        },
    }
}

/// Exit codes are clamped into the range a process can return.
pub fn process_exit_code(summary: &ExitSummary) -> u8 {
    u8::try_from(summary.exit_code).unwrap_or(UNEXPECTED_EXIT_CODE as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use odoo_tuner_core::CollectionError;

    fn collection_failure(err: CollectionError) -> Result<(), TunerError> {
        Err(err.into())
    }

    #[test]
    fn test_context_wrapped_collection_error() {
        let err = collection_failure(CollectionError::CommandTimedOut {
            command: "systemctl show odoo.service".into(),
            timeout_secs: 10,
        })
        .with_context(|| "Failed to collect facts for odoo.service")
        .unwrap_err();

        let summary = summarize_error(&err);
        assert_eq!(summary.error_code, "COMMAND_TIMED_OUT");
        assert_eq!(summary.exit_code, 4);
        assert_eq!(summary.hint, Some("Raise TUNER_COMMAND_TIMEOUT_SECS and retry"));
        assert_eq!(summary.log_level, LogLevel::Error);
        assert!(format!("{:#}", err).starts_with("Failed to collect facts for odoo.service: "));
    }

    #[test]
    fn test_nested_context_layers() {
        let err = collection_failure(CollectionError::ServiceNotFound("odoo.service".into()))
            .context("inner")
            .context("outer")
            .unwrap_err();
        let summary = summarize_error(&err);
        assert_eq!(summary.error_code, "SERVICE_NOT_FOUND");
        assert_eq!(process_exit_code(&summary), 3);
    }

    #[test]
    fn test_missing_metric() {
        let err = anyhow::Error::from(TunerError::MissingMetric {
            metric: "cpu_count",
        });
        let summary = summarize_error(&err);
        assert_eq!(summary.error_code, "MISSING_METRIC");
        assert_eq!(process_exit_code(&summary), 5);
        assert!(summary.hint.is_some());
    }

    #[test]
    fn test_selection_aborted_exit_code() {
        let err = anyhow::Error::from(TunerError::from(CollectionError::SelectionAborted));
        let summary = summarize_error(&err);
        assert_eq!(summary.log_level, LogLevel::Debug);
        assert_eq!(process_exit_code(&summary), 130);
        assert_eq!(summary.hint, None);
    }

    #[test]
    fn test_unrelated_error_is_unexpected() {
        let err = anyhow::Error::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            .context("Failed to write output");
        let summary = summarize_error(&err);
        assert_eq!(summary.error_code, "UNEXPECTED_ERROR");
        assert_eq!(process_exit_code(&summary), 1);
        assert_eq!(summary.hint, None);
    }
}
