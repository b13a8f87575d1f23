//! Serialize updated Deployments and persist them.

use std::path::Path;
use tracing::debug;

use crate::error::EmitError;
use crate::manifest::Deployment;

/// Render a Deployment as YAML
pub fn render(deployment: &Deployment) -> Result<String, EmitError> {
    serde_yaml::to_string(deployment).map_err(|e| EmitError::SerializeFailed {
        message: e.to_string(),
    })
}

/// Write a Deployment to `path`, replacing whatever is there
pub async fn write_deployment(deployment: &Deployment, path: &Path) -> Result<(), EmitError> {
    let yaml = render(deployment)?;

    tokio::fs::write(path, &yaml)
        .await
        .map_err(|e| EmitError::WriteFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!("Wrote {} bytes to {}", yaml.len(), path.display());
    Ok(())
}
