//! Text and JSON presentation of a tuning run.
//!
//! Nothing here computes a recommendation; values are printed exactly as the
//! engine produced them.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use odoo_tuner_core::{FactSheet, RecommendationSet, ServiceLimit, ShellLimit};
use serde::Serialize;

/// JSON document written by `--output` and printed by `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub facts: FactSheet,
    pub recommendations: RecommendationSet,
}

impl Report {
    pub fn new(facts: FactSheet, recommendations: RecommendationSet) -> Self {
        let hostname = hostname::get()
            .ok()
            .map(|name| name.to_string_lossy().into_owned());
        Self {
            service: facts.service.clone(),
            hostname,
            generated_at: Utc::now(),
            facts,
            recommendations,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Serialize report")
    }
}

/// Write the JSON report to `path`.
pub fn write_report(path: &Path, report: &Report) -> anyhow::Result<()> {
    let json = report.to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

/// Odoo `[options]` block followed by a systemd `[Service]` drop-in.
pub fn render_text(service: &str, rec: &RecommendationSet) -> String {
    let nofile_note = if rec.nofile_is_unlimited() {
        "  # unlimited (RLIM_INFINITY)"
    } else {
        ""
    };

    format!(
        "# Odoo configuration recommendations\n\
         [options]\n\
         limit_memory_soft = {soft}  # ~90% of RAM in bytes\n\
         limit_memory_hard = {hard}  # 1.5× RAM in bytes\n\
         limit_time_cpu    = {cpu}  # seconds\n\
         limit_time_real   = {real}  # seconds\n\
         limit_request     = {request}  # count, 0=unlimited\n\
         workers           = {workers}  # number of workers\n\
         \n\
         # systemd drop-in (systemctl edit {service})\n\
         [Service]\n\
         LimitNOFILE={nofile}{nofile_note}\n",
        soft = rec.limit_memory_soft,
        hard = rec.limit_memory_hard,
        cpu = rec.limit_time_cpu,
        real = rec.limit_time_real,
        request = rec.limit_request,
        workers = rec.workers,
        nofile = rec.limit_nofile,
    )
}

/// Human-readable summary of what was collected.
pub fn render_facts(facts: &FactSheet) -> String {
    let cpus = facts
        .cpu_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let shell = match &facts.shell_fd_limit {
        Some(ShellLimit::Limited(n)) => n.to_string(),
        Some(ShellLimit::Unlimited) => "unlimited".to_string(),
        Some(ShellLimit::Unrecognized(raw)) => format!("unrecognized ({})", raw),
        None => "not reported".to_string(),
    };

    format!(
        "# Host facts for {service}\n\
         total memory      : {total}\n\
         available memory  : {available}\n\
         swap              : {swap}\n\
         cpus              : {cpus}\n\
         shell open files  : {shell}\n\
         unit LimitNOFILE  : {unit_nofile}\n\
         unit LimitNPROC   : {unit_nproc}\n",
        service = facts.service,
        total = format_bytes(facts.total_memory_bytes),
        available = format_bytes(facts.available_memory_bytes),
        swap = format_bytes(facts.swap_total_bytes),
        unit_nofile = format_service_limit(facts.service_fd_limit),
        unit_nproc = format_service_limit(facts.service_process_limit),
    )
}

fn format_service_limit(limit: ServiceLimit) -> String {
    match limit {
        ServiceLimit::Limited(n) => n.to_string(),
        ServiceLimit::Infinity => "infinity".to_string(),
        ServiceLimit::NotSet => "not set".to_string(),
    }
}

fn format_bytes(bytes: Option<u64>) -> String {
    match bytes {
        Some(bytes) => format!(
            "{} bytes ({:.2} GiB)",
            bytes,
            bytes as f64 / (1024.0 * 1024.0 * 1024.0)
        ),
        None => "unknown".to_string(),
    }
}
