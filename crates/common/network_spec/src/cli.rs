use std::{fs, sync::Arc};

use crate::networks::{DEV, MAINNET, NetworkSpec};

pub fn network_parser(network_string: &str) -> Result<Arc<NetworkSpec>, String> {
    match network_string {
        "mainnet" => Ok(MAINNET.clone()),
        "dev" => Ok(DEV.clone()),
        path => read_network_spec(path),
    }
}

fn read_network_spec(path: &str) -> Result<Arc<NetworkSpec>, String> {
    let contents = fs::read_to_string(path).map_err(|err| format!("Failed to read file: {err}"))?;
    let network_spec: NetworkSpec = serde_yaml::from_str(&contents)
        .map_err(|err| format!("Failed to parse YAML from: {err}"))?;
    network_spec
        .validate()
        .map_err(|err| format!("Invalid network spec {path}: {err}"))?;
    Ok(Arc::new(network_spec))
}
