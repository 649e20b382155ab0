//! System metrics collector
//!
//! Reads memory and CPU facts through sysinfo, shell limits through
//! `ulimit -a` and service limits through `systemctl show`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use odoo_tuner_core::{
    CollectionError, FactSheet, MetricsCollector, ServiceLimit, ShellLimit, TunerConfig,
};
use sysinfo::System;
use tracing::{debug, info, warn};

use crate::command::{CommandRunner, ProcessRunner};
use crate::parsers::{parse_systemctl_show, parse_ulimit_output};

/// Memory and CPU facts for the host. Zero memory readings are reported as
/// `None`; a zero CPU count is kept and floored by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostMemory {
    pub total_bytes: Option<u64>,
    pub available_bytes: Option<u64>,
    pub swap_total_bytes: Option<u64>,
    pub cpu_count: Option<u32>,
}

pub type HostReader = fn() -> Result<HostMemory, CollectionError>;

/// Take a fresh sysinfo reading.
pub fn read_host_memory() -> Result<HostMemory, CollectionError> {
    let mut system = System::new();
    system.refresh_memory();
    system.refresh_cpu();

    host_memory_from_reading(
        system.total_memory(),
        system.available_memory(),
        system.total_swap(),
        system.cpus().len(),
    )
}

/// Map raw sysinfo numbers onto `HostMemory`.
pub fn host_memory_from_reading(
    total: u64,
    available: u64,
    swap: u64,
    cpus: usize,
) -> Result<HostMemory, CollectionError> {
    let non_zero = |value: u64| (value > 0).then_some(value);
    let cpu_count = u32::try_from(cpus)
        .map_err(|e| CollectionError::SystemInfo(format!("CPU count out of range: {}", e)))?;
    if cpu_count == 0 {
        warn!("sysinfo reported no CPUs");
    }

    Ok(HostMemory {
        total_bytes: non_zero(total),
        available_bytes: non_zero(available),
        swap_total_bytes: Some(swap),
        cpu_count: Some(cpu_count),
    })
}

pub struct SystemCollector<R = ProcessRunner> {
    runner: R,
    shell_path: String,
    systemctl_path: String,
    host_reader: HostReader,
}

impl SystemCollector<ProcessRunner> {
    pub fn from_config(config: &TunerConfig) -> Self {
        Self::new(ProcessRunner::new(config.command_timeout()), config)
    }
}

impl<R: CommandRunner> SystemCollector<R> {
    pub fn new(runner: R, config: &TunerConfig) -> Self {
        Self {
            runner,
            shell_path: config.shell_path.clone(),
            systemctl_path: config.systemctl_path.clone(),
            host_reader: read_host_memory,
        }
    }

    /// Replace the sysinfo reader, e.g. with a fixed reading.
    pub fn with_host_reader(mut self, host_reader: HostReader) -> Self {
        self.host_reader = host_reader;
        self
    }

    async fn host_memory(&self) -> Result<HostMemory, CollectionError> {
        let reader = self.host_reader;
        tokio::task::spawn_blocking(reader)
            .await
            .map_err(|e| CollectionError::SystemInfo(format!("sysinfo task failed: {}", e)))?
    }

    async fn shell_limits(&self) -> Result<BTreeMap<String, String>, CollectionError> {
        let args = vec!["-c".to_string(), "ulimit -a".to_string()];
        let output = self.runner.run(&self.shell_path, &args).await?;
        let limits = parse_ulimit_output(&output.stdout);
        if limits.is_empty() {
            warn!(shell = %self.shell_path, "Shell reported no resource limits");
        }
        Ok(limits)
    }

    async fn service_limits(
        &self,
        service: &str,
    ) -> Result<(ServiceLimit, ServiceLimit), CollectionError> {
        let args = vec![
            "show".to_string(),
            service.to_string(),
            "--property=LoadState".to_string(),
            "--property=LimitNOFILE".to_string(),
            "--property=LimitNPROC".to_string(),
        ];
        let output = self.runner.run(&self.systemctl_path, &args).await?;
        let properties = parse_systemctl_show(&output.stdout);

        if properties.get("LoadState").map(String::as_str) == Some("not-found") {
            return Err(CollectionError::ServiceNotFound(service.to_string()));
        }

        let limit = |key: &str| {
            properties
                .get(key)
                .map(|raw| ServiceLimit::parse(raw))
                .unwrap_or_default()
        };
        Ok((limit("LimitNOFILE"), limit("LimitNPROC")))
    }
}

#[async_trait]
impl<R: CommandRunner> MetricsCollector for SystemCollector<R> {
    #[tracing::instrument(skip(self))]
    async fn collect(&self, service: &str) -> Result<FactSheet, CollectionError> {
        let (service_fd_limit, service_process_limit) = self.service_limits(service).await?;
        let shell_limits = self.shell_limits().await?;
        let host = self.host_memory().await?;

        let shell_fd_limit = shell_limits.get("n").map(|raw| ShellLimit::parse(raw));
        if let Some(ShellLimit::Unrecognized(raw)) = &shell_fd_limit {
            warn!(value = %raw, "Unrecognized open files limit from shell");
        }

        debug!(
            total_memory_bytes = ?host.total_bytes,
            cpu_count = ?host.cpu_count,
            service_fd_limit = ?service_fd_limit,
            "Collected host facts"
        );
        info!(service = %service, "Collected facts");

        Ok(FactSheet {
            service: service.to_string(),
            total_memory_bytes: host.total_bytes,
            available_memory_bytes: host.available_bytes,
            swap_total_bytes: host.swap_total_bytes,
            cpu_count: host.cpu_count,
            shell_fd_limit,
            shell_limits,
            service_fd_limit,
            service_process_limit,
        })
    }
}
