//! # Manifest classification
//!
//! Every candidate file is decoded once into a loose YAML envelope. The
//! envelope's `apiVersion`/`kind` pair decides which typed view, if any, the
//! same document is decoded into:
//!
//! - `v1` / `Secret` → [`Manifest::Secret`]
//! - `apps/v1` / `Deployment` → [`Manifest::Deployment`]
//! - anything else → [`Manifest::Unrecognized`], no typed decode attempted

mod types;

pub use types::{Deployment, EnvVar, Secret};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

use crate::error::ManifestError;

pub const SECRET_KIND: &str = "Secret";
pub const SECRET_API_VERSION: &str = "v1";
pub const DEPLOYMENT_KIND: &str = "Deployment";
pub const DEPLOYMENT_API_VERSION: &str = "apps/v1";

/// A single decoded manifest file
#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
    Secret(Secret),
    Deployment(Deployment),
    Unrecognized { api_version: String, kind: String },
}

/// Loose first-pass view of a document, only used to read the type tags
#[derive(Debug, Clone, Default)]
pub struct ManifestEnvelope {
    document: Mapping,
}

impl ManifestEnvelope {
    /// Parse raw file content.
    ///
    /// Only the first document of a stream is read; later documents are
    /// ignored. An empty stream yields an empty envelope.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let Some(document) = serde_yaml::Deserializer::from_str(content).next() else {
            return Ok(Self::default());
        };

        let value = Value::deserialize(document).map_err(|e| ManifestError::InvalidYaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        match value {
            Value::Mapping(document) => Ok(Self { document }),
            Value::Null => Ok(Self::default()),
            _ => Err(ManifestError::InvalidYaml {
                path: path.to_path_buf(),
                message: "document root is not a mapping".to_string(),
            }),
        }
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.document.get(key).and_then(Value::as_str)
    }

    /// `(apiVersion, kind)` when both are present and strings
    pub fn tags(&self) -> Option<(&str, &str)> {
        Some((self.tag("apiVersion")?, self.tag("kind")?))
    }

    /// Decode the whole document into a typed view
    fn decode<T: DeserializeOwned>(self, path: &Path, kind: &str) -> Result<T, ManifestError> {
        serde_yaml::from_value(Value::Mapping(self.document)).map_err(|e| {
            ManifestError::DecodeFailed {
                path: path.to_path_buf(),
                kind: kind.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Classify file content and decode it into the matching typed manifest
pub fn classify(path: &Path, content: &str) -> Result<Manifest, ManifestError> {
    let envelope = ManifestEnvelope::parse(path, content)?;

    let (api_version, kind) = match envelope.tags() {
        Some((api_version, kind)) => (api_version.to_string(), kind.to_string()),
        None => {
            return Err(ManifestError::MissingTag {
                path: path.to_path_buf(),
            })
        }
    };
    debug!("{}: apiVersion={} kind={}", path.display(), api_version, kind);

    match (kind.as_str(), api_version.as_str()) {
        (SECRET_KIND, SECRET_API_VERSION) => envelope.decode(path, &kind).map(Manifest::Secret),
        (DEPLOYMENT_KIND, DEPLOYMENT_API_VERSION) => {
            envelope.decode(path, &kind).map(Manifest::Deployment)
        }
        _ => Ok(Manifest::Unrecognized { api_version, kind }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("manifest.yaml")
    }

    #[test]
    fn test_classify_secret() {
        let manifest = classify(
            path(),
            "apiVersion: v1\nkind: Secret\nmetadata:\n  name: app-secret\ndata:\n  db_user: eA==\n",
        )
        .unwrap();

        match manifest {
            Manifest::Secret(secret) => {
                assert_eq!(secret.name(), Some("app-secret"));
                assert!(secret.data.contains_key("db_user"));
            }
            other => panic!("expected Secret, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_deployment() {
        let manifest = classify(
            path(),
            "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\nspec:\n  template:\n    spec:\n      containers:\n        - name: web\n          image: nginx\n",
        )
        .unwrap();

        match manifest {
            Manifest::Deployment(deployment) => {
                assert_eq!(deployment.name(), "web");
                assert_eq!(deployment.containers().len(), 1);
            }
            other => panic!("expected Deployment, got {:?}", other),
        }
    }

    #[test]
    fn test_other_kind_is_unrecognized() {
        let manifest = classify(path(), "apiVersion: v1\nkind: ConfigMap\ndata:\n  a: b\n").unwrap();
        assert_eq!(
            manifest,
            Manifest::Unrecognized {
                api_version: "v1".to_string(),
                kind: "ConfigMap".to_string(),
            }
        );
    }

    #[test]
    fn test_version_mismatch_is_unrecognized() {
        let secret = classify(path(), "apiVersion: v2\nkind: Secret\n").unwrap();
        assert!(matches!(secret, Manifest::Unrecognized { .. }));

        let deployment = classify(path(), "apiVersion: extensions/v1beta1\nkind: Deployment\n").unwrap();
        assert!(matches!(deployment, Manifest::Unrecognized { .. }));
    }

    #[test]
    fn test_missing_or_non_string_tags() {
        assert!(matches!(
            classify(path(), "kind: Secret\n"),
            Err(ManifestError::MissingTag { .. })
        ));
        assert!(matches!(
            classify(path(), "apiVersion: v1\nkind: [Secret]\n"),
            Err(ManifestError::MissingTag { .. })
        ));
        assert!(matches!(classify(path(), ""), Err(ManifestError::MissingTag { .. })));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            classify(path(), "apiVersion: v1\nkind: [unterminated\n"),
            Err(ManifestError::InvalidYaml { .. })
        ));
        assert!(matches!(
            classify(path(), "- just\n- a\n- list\n"),
            Err(ManifestError::InvalidYaml { .. })
        ));
    }

    #[test]
    fn test_trailing_document_separator() {
        let manifest = classify(
            path(),
            "apiVersion: v1\nkind: Secret\nmetadata:\n  name: s\ndata:\n  a: b\n---\n",
        )
        .unwrap();
        match manifest {
            Manifest::Secret(secret) => assert_eq!(secret.name(), Some("s")),
            other => panic!("expected Secret, got {:?}", other),
        }
    }

    #[test]
    fn test_only_first_document_is_read() {
        let manifest = classify(
            path(),
            "---\napiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: first\n---\napiVersion: v1\nkind: Secret\nmetadata:\n  name: second\n",
        )
        .unwrap();
        match manifest {
            Manifest::Deployment(deployment) => assert_eq!(deployment.name(), "first"),
            other => panic!("expected Deployment, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_secret_values_survive_classification() {
        let manifest = classify(
            path(),
            "apiVersion: v1\nkind: Secret\nmetadata:\n  name: s\ndata: {port: 8080, debug: true, empty: }\n",
        )
        .unwrap();
        match manifest {
            Manifest::Secret(secret) => {
                let keys: Vec<&str> = secret.data.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["debug", "empty", "port"]);
            }
            other => panic!("expected Secret, got {:?}", other),
        }
    }

    #[test]
    fn test_typed_decode_failure() {
        let result = classify(
            path(),
            "apiVersion: apps/v1\nkind: Deployment\nspec:\n  template:\n    spec:\n      containers: oops\n",
        );
        match result {
            Err(ManifestError::DecodeFailed { kind, .. }) => assert_eq!(kind, "Deployment"),
            other => panic!("expected DecodeFailed, got {:?}", other),
        }
    }
}
