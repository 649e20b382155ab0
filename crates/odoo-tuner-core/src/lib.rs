//! Odoo Tuner Core Library
//!
//! This crate provides the fact sheet and recommendation types, the pure
//! recommendation engine, error types and configuration shared by the
//! collector and the CLI.

pub mod collector;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use collector::MetricsCollector;
pub use config::TunerConfig;
pub use engine::recommend;
pub use error::{CollectionError, ErrorMetadata, LogLevel, TunerError};
pub use models::{FactSheet, RecommendationSet, ServiceLimit, ShellLimit};
