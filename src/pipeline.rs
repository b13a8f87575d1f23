//! # Injection pipeline
//!
//! One linear pass per run:
//!
//! 1. discover candidate files
//! 2. classify and decode each file; keep the last Secret, collect every Deployment
//! 3. inject the Secret's keys into each Deployment
//! 4. write each Deployment to the output file (or stdout in dry-run mode)
//!
//! Only discovery failures abort the run. Any per-file or per-Deployment
//! failure is logged and the item is skipped.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::InjectConfig;
use crate::discovery::discover_manifests;
use crate::emit;
use crate::error::ManifestError;
use crate::inject;
use crate::manifest::{self, Deployment, Manifest, Secret};
use crate::ui;

/// Manifests collected during a scan
#[derive(Debug, Default)]
pub struct ManifestSet {
    /// Last Secret seen, replaced by each later one
    pub secret: Option<Secret>,
    /// Deployments in discovery order
    pub deployments: Vec<Deployment>,
}

impl ManifestSet {
    fn record(&mut self, path: &Path, manifest: Manifest) {
        match manifest {
            Manifest::Secret(secret) => {
                info!("Valid Secret found in file {}", path.display());
                self.secret = Some(secret);
            }
            Manifest::Deployment(deployment) => {
                info!("Valid Deployment found in file {}", path.display());
                self.deployments.push(deployment);
            }
            Manifest::Unrecognized { api_version, kind } => {
                info!(
                    "File {} is not a Secret or Deployment ({}/{}): skipping",
                    path.display(),
                    api_version,
                    kind
                );
            }
        }
    }
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub secret_name: Option<String>,
    pub deployments_found: usize,
    pub deployments_emitted: usize,
    /// Deployments skipped by a failed injection, render or write
    pub deployments_failed: usize,
    /// Set once at least one Deployment was written
    pub output_path: Option<PathBuf>,
}

async fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    manifest::classify(path, &content)
}

/// Read and classify every file, returning the collected manifests and the skip count
pub async fn collect_manifests(files: &[PathBuf]) -> (ManifestSet, usize) {
    let mut set = ManifestSet::default();
    let mut skipped = 0;

    for path in files {
        info!("Processing file: {}", path.display());

        match load_manifest(path).await {
            Ok(manifest) => {
                if matches!(manifest, Manifest::Unrecognized { .. }) {
                    skipped += 1;
                }
                set.record(path, manifest);
            }
            Err(e) => {
                warn!("{}: skipping", e);
                skipped += 1;
            }
        }
    }

    (set, skipped)
}

/// Run the whole pipeline for `config`
pub async fn run(config: &InjectConfig) -> Result<RunSummary> {
    let files = discover_manifests(&config.manifest_dir, &config.pattern)
        .await
        .context("Failed to list YAML files")?;

    let (set, files_skipped) = collect_manifests(&files).await;

    let mut summary = RunSummary {
        files_scanned: files.len(),
        files_skipped,
        deployments_found: set.deployments.len(),
        ..RunSummary::default()
    };

    let Some(secret) = set.secret else {
        ui::print_warning("No valid Secret found, skipping Deployment processing");
        return Ok(summary);
    };
    summary.secret_name = secret.name().map(str::to_string);

    let output_path = config.output_path();

    for mut deployment in set.deployments {
        match inject::inject_secret(&secret, &mut deployment) {
            Ok(count) => info!(
                "Injected {} env vars into {} container(s) of Deployment {}",
                count,
                deployment.containers().len(),
                deployment.name()
            ),
            Err(e) => {
                warn!("Skipping Deployment {}: {}", deployment.name(), e);
                summary.deployments_failed += 1;
                continue;
            }
        }

        if config.dry_run {
            match emit::render(&deployment) {
                Ok(yaml) => {
                    print!("---\n{}", yaml);
                    summary.deployments_emitted += 1;
                }
                Err(e) => {
                    warn!("{}", e);
                    summary.deployments_failed += 1;
                }
            }
            continue;
        }

        match emit::write_deployment(&deployment, &output_path).await {
            Ok(()) => {
                ui::print_success(&format!(
                    "Updated Deployment YAML saved to {}",
                    output_path.display()
                ));
                summary.deployments_emitted += 1;
                summary.output_path = Some(output_path.clone());
            }
            Err(e) => {
                warn!("{}", e);
                summary.deployments_failed += 1;
            }
        }
    }

    Ok(summary)
}
