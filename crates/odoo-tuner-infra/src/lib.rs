//! Odoo Tuner Infrastructure Library
//!
//! This crate talks to the host on behalf of the core:
//! - Command execution with timeouts
//! - Parsers for `ulimit -a` and `systemctl` output
//! - Service discovery through systemd
//! - The system `MetricsCollector` implementation

pub mod command;
pub mod discovery;
pub mod parsers;
pub mod system;

pub use command::{CommandOutput, CommandRunner, ProcessRunner};
pub use discovery::ServiceDiscovery;
pub use system::{host_memory_from_reading, HostMemory, SystemCollector};
