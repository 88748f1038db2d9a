use std::{net::IpAddr, path::PathBuf, sync::Arc, time::Duration};

use alloy_primitives::Address;
use clap::Parser;
use ream_network_spec::{cli::network_parser, networks::NetworkSpec};
use url::Url;

use crate::cli::constants::{
    DEFAULT_BEACON_API_ENDPOINT, DEFAULT_METRICS_ADDRESS, DEFAULT_METRICS_ENABLED,
    DEFAULT_METRICS_PORT, DEFAULT_NETWORK, DEFAULT_REQUEST_TIMEOUT,
};

#[derive(Debug, Parser)]
pub struct ValidatorNodeConfig {
    #[arg(long, help = "Set HTTP url of the beacon api endpoint", default_value = DEFAULT_BEACON_API_ENDPOINT)]
    pub beacon_api_endpoint: Url,

    #[arg(long, help = "Set HTTP request timeout for beacon api calls", default_value = DEFAULT_REQUEST_TIMEOUT, value_parser = duration_parser)]
    pub request_timeout: Duration,

    #[arg(
        long,
        help = "Choose mainnet, dev or provide a path to a YAML config file",
        default_value = DEFAULT_NETWORK,
        value_parser = network_parser
    )]
    pub network: Arc<NetworkSpec>,

    #[arg(long, help = "The path to the validator registry")]
    pub validator_registry: PathBuf,

    #[arg(
        long,
        help = "Seconds into each slot at which to attest. Defaults to half a slot",
        value_parser = duration_parser
    )]
    pub attestation_delay: Option<Duration>,

    #[arg(
        long,
        help = "Deposit contract address to check against the one stored in the data directory"
    )]
    pub deposit_contract_address: Option<Address>,

    #[arg(
        long,
        help = "The directory for storing application data. If used together with --ephemeral, new child directory will be created."
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(
        long,
        short,
        help = "Use new data directory, located in OS temporary directory. If used together with --data-dir, new directory will be created there instead."
    )]
    pub ephemeral: bool,

    #[arg(long = "enable-metrics", help = "Enable metrics", default_value_t = DEFAULT_METRICS_ENABLED)]
    pub enable_metrics: bool,

    #[arg(long, help = "Set metrics address", default_value_t = DEFAULT_METRICS_ADDRESS)]
    pub metrics_address: IpAddr,

    #[arg(long, help = "Set metrics port", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,
}

impl ValidatorNodeConfig {
    pub fn attestation_delay(&self) -> Duration {
        self.attestation_delay
            .unwrap_or_else(|| self.network.attestation_delay())
    }
}

pub fn duration_parser(duration_string: &str) -> Result<Duration, String> {
    Ok(Duration::from_secs(duration_string.parse().map_err(
        |err| format!("Could not parse the duration: {err:?}"),
    )?))
}
