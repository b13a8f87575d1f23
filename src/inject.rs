//! Env injection: replace every container's env with references to a Secret's keys.
//!
//! For a Secret named `app-secret` with data keys `db_user` and `DB_PASS`, each
//! container ends up with:
//!
//! ```yaml
//! env:
//!   - name: DB_PASS
//!     valueFrom:
//!       secretKeyRef:
//!         name: app-secret
//!         key: DB_PASS
//!   - name: DB_USER
//!     valueFrom:
//!       secretKeyRef:
//!         name: app-secret
//!         key: db_user
//! ```
//!
//! Existing env entries are discarded, not merged. Secret values are never read.

use crate::error::InjectError;
use crate::manifest::{Deployment, EnvVar, Secret};

/// Build the env list for `secret`, sorted by upper-cased name
///
/// Keys that upper-case to the same name are all kept, ordered by their
/// original key.
pub fn secret_env(secret: &Secret) -> Result<Vec<EnvVar>, InjectError> {
    let secret_name = secret.name().ok_or(InjectError::SecretNameMissing)?;

    // data is a BTreeMap, so equal names stay in original key order after the stable sort
    let mut env: Vec<EnvVar> = secret
        .data
        .keys()
        .map(|key| EnvVar::from_secret_key(key.to_ascii_uppercase(), secret_name, key))
        .collect();
    env.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(env)
}

/// Replace the env of every container in `deployment` with `env`
pub fn replace_container_env(deployment: &mut Deployment, env: &[EnvVar]) {
    for container in deployment.containers_mut() {
        container.env = env.to_vec();
    }
}

/// Inject `secret`'s keys into every container of `deployment`
///
/// Returns the number of env entries each container now carries.
pub fn inject_secret(secret: &Secret, deployment: &mut Deployment) -> Result<usize, InjectError> {
    let env = secret_env(secret)?;
    replace_container_env(deployment, &env);
    Ok(env.len())
}
