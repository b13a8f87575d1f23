//! Centralized error types for secret-inject
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.
//!
//! Discovery and configuration errors abort the run. Everything else is
//! logged against the offending file or Deployment and skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest discovery errors (fatal)
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Invalid manifest pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to list manifest directory {}: {message}", path.display())]
    ListFailed { path: PathBuf, message: String },
}

/// Per-file manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read file {}: {message}", path.display())]
    ReadFailed { path: PathBuf, message: String },

    #[error("Failed to parse YAML in file {}: {message}", path.display())]
    InvalidYaml { path: PathBuf, message: String },

    #[error("File {} does not have valid apiVersion or kind", path.display())]
    MissingTag { path: PathBuf },

    #[error("Failed to parse {kind} YAML in file {}: {message}", path.display())]
    DecodeFailed {
        path: PathBuf,
        kind: String,
        message: String,
    },
}

/// Env injection errors
#[derive(Error, Debug)]
pub enum InjectError {
    #[error("Secret metadata has no usable 'name' field")]
    SecretNameMissing,
}

/// Output errors
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to marshal updated Deployment YAML: {message}")]
    SerializeFailed { message: String },

    #[error("Failed to write updated Deployment file {}: {message}", path.display())]
    WriteFailed { path: PathBuf, message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
