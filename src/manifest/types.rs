//! Typed views of the two manifest kinds the tool understands.
//!
//! Only the modelled fields survive a decode/encode cycle. Mappings the tool
//! never inspects (metadata, selector, pod template metadata, ports) are kept
//! as raw YAML and written back untouched.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Render a YAML scalar as text; null becomes `""`
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Accept any scalar where a string is expected, as Kubernetes manifests
/// routinely write unquoted numbers and booleans
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value).ok_or_else(|| D::Error::custom("expected a scalar value"))
}

/// String-to-string map whose keys and values may be any scalar
fn lenient_string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mapping = Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default();

    mapping
        .into_iter()
        .map(|(key, value)| -> Result<(String, String), D::Error> {
            let key = scalar_to_string(key)
                .ok_or_else(|| D::Error::custom("expected a scalar map key"))?;
            let value = scalar_to_string(value)
                .ok_or_else(|| D::Error::custom(format!("expected a scalar value for '{}'", key)))?;
            Ok((key, value))
        })
        .collect()
}

/// `v1/Secret`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub api_version: String,
    pub kind: String,

    #[serde(default)]
    pub metadata: Mapping,

    /// Only the keys are used; values are never read
    #[serde(default, deserialize_with = "lenient_string_map")]
    pub data: BTreeMap<String, String>,
}

impl Secret {
    /// `metadata.name`, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }
}

/// `apps/v1/Deployment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub api_version: String,
    pub kind: String,

    #[serde(default)]
    pub metadata: Mapping,

    #[serde(default)]
    pub spec: DeploymentSpec,
}

impl Deployment {
    /// `metadata.name`, used for log lines
    pub fn name(&self) -> &str {
        self.metadata
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
    }

    pub fn containers(&self) -> &[Container] {
        &self.spec.template.spec.containers
    }

    pub fn containers_mut(&mut self) -> &mut [Container] {
        &mut self.spec.template.spec.containers
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    #[serde(default)]
    pub selector: Mapping,

    #[serde(default)]
    pub template: PodTemplate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodTemplate {
    #[serde(default)]
    pub metadata: Mapping,

    #[serde(default)]
    pub spec: PodSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Value>,

    #[serde(default)]
    pub env: Vec<EnvVar>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

impl EnvVar {
    /// Env var `name` resolved from `key` of the Secret `secret_name`
    pub fn from_secret_key(name: String, secret_name: &str, key: &str) -> Self {
        Self {
            name,
            value_from: Some(EnvVarSource {
                secret_key_ref: SecretKeyRef {
                    name: secret_name.to_string(),
                    key: key.to_string(),
                },
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    #[serde(default)]
    pub secret_key_ref: SecretKeyRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKeyRef {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,
}
