//! Fact sheet and recommendation models
//!
//! A `FactSheet` is what the collector saw on the host; a `RecommendationSet`
//! is what the engine derives from it. Both serialize with stable keys for the
//! JSON report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::RLIM_INFINITY;

/// Open file limit as reported by the shell (`ulimit -n`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellLimit {
    Limited(u64),
    Unlimited,
    /// Raw text that was neither a number nor `unlimited`.
    Unrecognized(String),
}

impl ShellLimit {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("unlimited") {
            return ShellLimit::Unlimited;
        }
        match raw.parse::<u64>() {
            Ok(value) => ShellLimit::Limited(value),
            Err(_) => ShellLimit::Unrecognized(raw.to_string()),
        }
    }

    /// Numeric view of the limit. `Unlimited` maps to `RLIM_INFINITY`,
    /// `Unrecognized` has no numeric value.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            ShellLimit::Limited(value) => Some(*value),
            ShellLimit::Unlimited => Some(RLIM_INFINITY),
            ShellLimit::Unrecognized(_) => None,
        }
    }
}

/// Resource limit as reported by the service manager (`systemctl show`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLimit {
    Limited(u64),
    Infinity,
    #[default]
    NotSet,
}

impl ServiceLimit {
    /// Parse a systemd property value. Empty or unknown text is `NotSet`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("infinity") {
            return ServiceLimit::Infinity;
        }
        match raw.parse::<u64>() {
            Ok(RLIM_INFINITY) => ServiceLimit::Infinity,
            Ok(value) => ServiceLimit::Limited(value),
            Err(_) => ServiceLimit::NotSet,
        }
    }
}

/// Snapshot of host and service facts, produced once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSheet {
    pub service: String,
    pub total_memory_bytes: Option<u64>,
    /// Diagnostic only, never used by the engine.
    pub available_memory_bytes: Option<u64>,
    pub swap_total_bytes: Option<u64>,
    pub cpu_count: Option<u32>,
    pub shell_fd_limit: Option<ShellLimit>,
    /// Every `ulimit -a` entry keyed by its option letter.
    #[serde(default)]
    pub shell_limits: BTreeMap<String, String>,
    #[serde(default)]
    pub service_fd_limit: ServiceLimit,
    #[serde(default)]
    pub service_process_limit: ServiceLimit,
}

impl FactSheet {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Default::default()
        }
    }
}

/// Recommended settings. Keys are fixed; values are plain integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Bytes.
    pub limit_memory_soft: u64,
    /// Bytes.
    pub limit_memory_hard: u64,
    #[serde(rename = "LimitNOFILE")]
    pub limit_nofile: u64,
    pub workers: u32,
    /// Seconds.
    pub limit_time_cpu: u64,
    /// Seconds.
    pub limit_time_real: u64,
    /// Request count, 0 = unlimited.
    pub limit_request: u64,
}

impl RecommendationSet {
    pub const KEYS: [&'static str; 7] = [
        "limit_memory_soft",
        "limit_memory_hard",
        "LimitNOFILE",
        "workers",
        "limit_time_cpu",
        "limit_time_real",
        "limit_request",
    ];

    /// Key/value pairs in `KEYS` order.
    pub fn entries(&self) -> [(&'static str, u64); 7] {
        [
            (Self::KEYS[0], self.limit_memory_soft),
            (Self::KEYS[1], self.limit_memory_hard),
            (Self::KEYS[2], self.limit_nofile),
            (Self::KEYS[3], u64::from(self.workers)),
            (Self::KEYS[4], self.limit_time_cpu),
            (Self::KEYS[5], self.limit_time_real),
            (Self::KEYS[6], self.limit_request),
        ]
    }

    pub fn nofile_is_unlimited(&self) -> bool {
        self.limit_nofile == RLIM_INFINITY
    }
}
