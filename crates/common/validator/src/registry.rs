use std::{fs, path::Path};

use ream_bls::PrivateKey;
use serde::{Deserialize, Serialize};

/// YAML structure representing the validator registry file
#[derive(Debug, Deserialize, Serialize)]
pub struct ValidatorRegistryYaml {
    pub validators: Vec<ValidatorEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidatorEntry {
    /// 0x-prefixed hex encoded BLS secret key
    pub secret_key: PrivateKey,
}

/// Load validator secret keys from a YAML registry file
pub fn load_validator_registry<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<PrivateKey>> {
    let content = fs::read_to_string(&path).map_err(|err| {
        anyhow::anyhow!(
            "Failed to read validator registry file {:?}: {err}",
            path.as_ref(),
        )
    })?;

    let registry = serde_yaml::from_str::<ValidatorRegistryYaml>(&content)
        .map_err(|err| anyhow::anyhow!("Failed to parse validator registry YAML: {err}"))?;

    Ok(registry
        .validators
        .into_iter()
        .map(|entry| entry.secret_key)
        .collect())
}
