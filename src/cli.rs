//! CLI definitions for secret-inject
//!
//! Every option is optional so that values from `--config` can fill the gaps.
//! Unset everywhere, the run scans `.` for `*.yaml` and writes
//! `deployment_updated.yaml` next to the manifests.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "secret-inject",
    version,
    about = "Point every Deployment container env var at a Secret's keys",
    long_about = "Scans a directory for Kubernetes manifests, picks up one Secret (v1) and any \
                  Deployments (apps/v1), and replaces each container's env with secretKeyRef \
                  entries for every key in the Secret."
)]
pub struct Cli {
    /// Directory containing the manifests (not searched recursively)
    #[arg(long, env = "SECRET_INJECT_DIR")]
    pub dir: Option<PathBuf>,

    /// File name glob used to pick manifests
    #[arg(long, env = "SECRET_INJECT_PATTERN")]
    pub pattern: Option<String>,

    /// Output file, relative to --dir unless absolute
    #[arg(long, env = "SECRET_INJECT_OUTPUT")]
    pub output: Option<String>,

    /// Path to YAML config file
    #[arg(long, env = "SECRET_INJECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print updated Deployments to stdout instead of writing the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
