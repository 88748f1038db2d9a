use std::{net::SocketAddr, process, sync::Arc};

use clap::Parser;
use ream::cli::{Cli, Commands, validator_node::ValidatorNodeConfig};
use ream_metrics::PrometheusVoteMetrics;
use ream_storage::db::ReamDB;
use ream_validator::{
    beacon_api_client::BeaconApiClient, registry::load_validator_registry, signer::LocalSigner,
    validator::ValidatorService,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let cli = Cli::parse();

    let env_filter = match EnvFilter::builder().try_from_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(cli.verbosity.directive()),
    };
    fmt().with_env_filter(env_filter).init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Failed to build tokio runtime: {err}");
            process::exit(1);
        }
    };

    let shutdown = CancellationToken::new();
    let result = runtime.block_on(async {
        tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Received shutdown signal");
                }
                shutdown.cancel();
            }
        });

        match cli.command {
            Commands::ValidatorNode(config) => run_validator_node(*config, shutdown).await,
        }
    });

    if let Err(err) = result {
        error!("Validator node exited with error: {err:?}");
        process::exit(1);
    }
}

/// Runs the validator client until shutdown.
pub async fn run_validator_node(
    config: ValidatorNodeConfig,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!("starting up validator node...");

    if let Some(deposit_contract_address) = config.deposit_contract_address {
        let ream_db = ReamDB::new(config.data_dir.clone(), config.ephemeral)?;
        ream_db.verify_deposit_contract_address(deposit_contract_address)?;
    }

    if config.enable_metrics {
        let metrics_address = SocketAddr::new(config.metrics_address, config.metrics_port);
        prometheus_exporter::start(metrics_address)?;
        info!("Serving metrics on {metrics_address}");
    }

    let signer = Arc::new(LocalSigner::new(load_validator_registry(
        &config.validator_registry,
    )?)?);
    let public_keys = signer
        .public_keys()
        .iter()
        .map(|public_key| public_key.to_bytes().to_vec())
        .collect::<Vec<_>>();
    info!("Loaded {} validator keys", public_keys.len());

    let attestation_delay = config.attestation_delay();
    let beacon_api_client = Arc::new(BeaconApiClient::new(
        config.beacon_api_endpoint,
        config.request_timeout,
    )?);

    ValidatorService::new(
        beacon_api_client,
        signer,
        Arc::new(PrometheusVoteMetrics),
        config.network,
        attestation_delay,
        public_keys,
    )
    .start(shutdown)
    .await
}
