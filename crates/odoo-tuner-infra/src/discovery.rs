//! Service discovery through systemd.

use odoo_tuner_core::{CollectionError, TunerConfig};
use tracing::debug;

use crate::command::{CommandRunner, ProcessRunner};
use crate::parsers::parse_unit_list;

pub struct ServiceDiscovery<R = ProcessRunner> {
    runner: R,
    systemctl_path: String,
}

impl ServiceDiscovery<ProcessRunner> {
    pub fn from_config(config: &TunerConfig) -> Self {
        Self::new(ProcessRunner::new(config.command_timeout()), config)
    }
}

impl<R: CommandRunner> ServiceDiscovery<R> {
    pub fn new(runner: R, config: &TunerConfig) -> Self {
        Self {
            runner,
            systemctl_path: config.systemctl_path.clone(),
        }
    }

    /// Loaded service units whose listing line contains `pattern`.
    ///
    /// An empty result is `NoServicesDetected`.
    pub async fn list_services(&self, pattern: &str) -> Result<Vec<String>, CollectionError> {
        let args: Vec<String> = ["list-units", "--type=service", "--no-legend", "--no-pager"]
            .iter()
            .map(|arg| arg.to_string())
            .collect();
        let output = self.runner.run(&self.systemctl_path, &args).await?;

        let services = parse_unit_list(&output.stdout, pattern);
        debug!(pattern = %pattern, matches = ?services, "Discovered services");

        if services.is_empty() {
            return Err(CollectionError::NoServicesDetected {
                pattern: pattern.to_string(),
            });
        }
        Ok(services)
    }
}
