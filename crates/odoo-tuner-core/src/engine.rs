//! Recommendation engine
//!
//! Pure mapping from a `FactSheet` to a `RecommendationSet`. No I/O, no
//! environment access; the same fact sheet always yields the same set.

use crate::constants::{
    DEFAULT_SHELL_NOFILE, HARD_MEMORY_DENOMINATOR, HARD_MEMORY_NUMERATOR, LIMIT_REQUEST,
    LIMIT_TIME_CPU_SECS, LIMIT_TIME_REAL_SECS, MIN_NOFILE_LIMIT, RESERVED_CORES,
    SOFT_MEMORY_DENOMINATOR, SOFT_MEMORY_NUMERATOR,
};
use crate::error::TunerError;
use crate::models::{FactSheet, RecommendationSet};

/// Derive the full recommendation set, or fail without producing any of it.
pub fn recommend(facts: &FactSheet) -> Result<RecommendationSet, TunerError> {
    let total_memory = match facts.total_memory_bytes {
        Some(bytes) if bytes > 0 => bytes,
        _ => {
            return Err(TunerError::MissingMetric {
                metric: "total_memory_bytes",
            })
        }
    };
    let cpu_count = facts.cpu_count.ok_or(TunerError::MissingMetric {
        metric: "cpu_count",
    })?;

    let shell_nofile = facts
        .shell_fd_limit
        .as_ref()
        .and_then(|limit| limit.as_count())
        .unwrap_or(DEFAULT_SHELL_NOFILE);

    Ok(RecommendationSet {
        limit_memory_soft: scale(total_memory, SOFT_MEMORY_NUMERATOR, SOFT_MEMORY_DENOMINATOR),
        limit_memory_hard: scale(total_memory, HARD_MEMORY_NUMERATOR, HARD_MEMORY_DENOMINATOR),
        limit_nofile: shell_nofile.max(MIN_NOFILE_LIMIT),
        workers: recommended_workers(cpu_count),
        limit_time_cpu: LIMIT_TIME_CPU_SECS,
        limit_time_real: LIMIT_TIME_REAL_SECS,
        limit_request: LIMIT_REQUEST,
    })
}

/// `floor(value * numerator / denominator)`, saturating at `u64::MAX`.
fn scale(value: u64, numerator: u128, denominator: u128) -> u64 {
    let scaled = u128::from(value) * numerator / denominator;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// One worker per core minus the reserved core, never fewer than one.
fn recommended_workers(cpu_count: u32) -> u32 {
    cpu_count.max(1).saturating_sub(RESERVED_CORES).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BYTES_PER_GIB, RLIM_INFINITY};
    use crate::models::ShellLimit;

    fn facts(memory: Option<u64>, cpus: Option<u32>, nofile: Option<ShellLimit>) -> FactSheet {
        FactSheet {
            total_memory_bytes: memory,
            cpu_count: cpus,
            shell_fd_limit: nofile,
            ..FactSheet::new("odoo.service")
        }
    }

    #[test]
    fn test_memory_ceilings_truncate() {
        let set = recommend(&facts(Some(7), Some(2), None)).unwrap();
        // 7 * 0.9 = 6.3, 7 * 1.5 = 10.5
        assert_eq!(set.limit_memory_soft, 6);
        assert_eq!(set.limit_memory_hard, 10);
    }

    #[test]
    fn test_memory_soft_below_hard() {
        for memory in [1u64, 2, 3, 10, 999, BYTES_PER_GIB, 64 * BYTES_PER_GIB + 1] {
            let set = recommend(&facts(Some(memory), Some(1), None)).unwrap();
            assert_eq!(set.limit_memory_soft, memory * 9 / 10);
            assert_eq!(set.limit_memory_hard, memory * 3 / 2);
            assert!(set.limit_memory_soft < set.limit_memory_hard, "M={}", memory);
        }
    }

    #[test]
    fn test_memory_hard_saturates() {
        let set = recommend(&facts(Some(u64::MAX), Some(1), None)).unwrap();
        assert_eq!(set.limit_memory_hard, u64::MAX);
        assert_eq!(set.limit_memory_soft, (u128::from(u64::MAX) * 9 / 10) as u64);
    }

    #[test]
    fn test_workers() {
        let workers = |cpus| recommend(&facts(Some(1024), Some(cpus), None)).unwrap().workers;
        assert_eq!(workers(0), 1);
        assert_eq!(workers(1), 1);
        assert_eq!(workers(2), 1);
        assert_eq!(workers(8), 7);
        assert_eq!(workers(u32::MAX), u32::MAX - 1);
    }

    #[test]
    fn test_nofile_floor() {
        let nofile = |limit| {
            recommend(&facts(Some(1024), Some(4), limit))
                .unwrap()
                .limit_nofile
        };
        assert_eq!(nofile(Some(ShellLimit::Limited(1024))), 65536);
        assert_eq!(nofile(Some(ShellLimit::Limited(65536))), 65536);
        assert_eq!(nofile(Some(ShellLimit::Limited(100000))), 100000);
        assert_eq!(nofile(Some(ShellLimit::Unlimited)), RLIM_INFINITY);
        assert_eq!(nofile(Some(ShellLimit::Unrecognized("n/a".into()))), 65536);
        assert_eq!(nofile(None), 65536);
    }

    #[test]
    fn test_constants_ignore_input() {
        for fact_sheet in [
            facts(Some(1), Some(0), None),
            facts(Some(u64::MAX), Some(256), Some(ShellLimit::Unlimited)),
        ] {
            let set = recommend(&fact_sheet).unwrap();
            assert_eq!(set.limit_time_cpu, 1800);
            assert_eq!(set.limit_time_real, 3600);
            assert_eq!(set.limit_request, 0);
        }
    }

    #[test]
    fn test_available_memory_is_ignored() {
        let base = facts(Some(4 * BYTES_PER_GIB), Some(4), None);
        let with_available = FactSheet {
            available_memory_bytes: Some(BYTES_PER_GIB),
            swap_total_bytes: Some(2 * BYTES_PER_GIB),
            ..base.clone()
        };
        assert_eq!(recommend(&base).unwrap(), recommend(&with_available).unwrap());
    }

    #[test]
    fn test_missing_memory() {
        for memory in [None, Some(0)] {
            let err = recommend(&facts(memory, Some(4), None)).unwrap_err();
            assert!(matches!(
                err,
                TunerError::MissingMetric {
                    metric: "total_memory_bytes"
                }
            ));
        }
    }

    #[test]
    fn test_missing_cpu_count() {
        let err = recommend(&facts(Some(BYTES_PER_GIB), None, None)).unwrap_err();
        assert!(matches!(
            err,
            TunerError::MissingMetric {
                metric: "cpu_count"
            }
        ));
    }
}
