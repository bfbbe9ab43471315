//! Shared types, errors, and configuration for Praxis.
//!
//! This crate provides common types used across the engine crates:
//! - Reporting window and chart resolution types
//! - The provision sign convention switch
//! - Engine-boundary error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use types::{ProvisionSign, ReportingWindow, Resolution};
