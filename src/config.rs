//! Run configuration: where to look for manifests and where to write the result.
//!
//! Values come from an optional YAML file and are then overridden by CLI flags.
//!
//! ```yaml
//! manifest_dir: ./k8s
//! pattern: "*.yaml"
//! output_file: deployment_updated.yaml
//! dry_run: false
//! ```

use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectConfig {
    /// Directory scanned for manifests (non-recursive)
    #[serde(default = "default_manifest_dir")]
    pub manifest_dir: PathBuf,

    /// File name glob, matched against each entry's file name
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Output file name; relative paths resolve against `manifest_dir`
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Print instead of writing
    #[serde(default)]
    pub dry_run: bool,
}

fn default_manifest_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_pattern() -> String {
    "*.yaml".to_string()
}

fn default_output_file() -> String {
    "deployment_updated.yaml".to_string()
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            manifest_dir: default_manifest_dir(),
            pattern: default_pattern(),
            output_file: default_output_file(),
            dry_run: false,
        }
    }
}

impl InjectConfig {
    /// Load configuration from a YAML file
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Resolve the effective configuration: config file (if any), then CLI overrides
    pub async fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overlay explicitly set CLI values
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.dir {
            self.manifest_dir = dir.clone();
        }
        if let Some(pattern) = &cli.pattern {
            self.pattern = pattern.clone();
        }
        if let Some(output) = &cli.output {
            self.output_file = output.clone();
        }
        if cli.dry_run {
            self.dry_run = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pattern".to_string(),
                value: self.pattern.clone(),
            });
        }

        if Pattern::new(&self.pattern).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "pattern".to_string(),
                value: self.pattern.clone(),
            });
        }

        if self.output_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output_file".to_string(),
                value: self.output_file.clone(),
            });
        }

        Ok(())
    }

    /// Where the updated Deployment is written
    pub fn output_path(&self) -> PathBuf {
        self.manifest_dir.join(&self.output_file)
    }
}
