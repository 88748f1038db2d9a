pub mod http_client;

use std::time::Duration;

use alloy_primitives::hex;
use async_trait::async_trait;
use http_client::ClientWithBaseUrl;
use ream_consensus_misc::{
    attestation::Attestation, attestation_data::AttestationData,
    committee_assignment::CommitteeAssignment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    beacon_node::{
        AttestationDataFetcher, AttestationPublisher, CommitteeAssignmentSource,
        ValidatorIndexResolver,
    },
    errors::ValidatorError,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidatorIndexData {
    #[serde(with = "serde_utils::quoted_u64")]
    pub index: u64,
}

#[derive(Clone)]
pub struct BeaconApiClient {
    http_client: ClientWithBaseUrl,
}

impl BeaconApiClient {
    pub fn new(beacon_api_endpoint: Url, request_timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http_client: ClientWithBaseUrl::new(beacon_api_endpoint, request_timeout)?,
        })
    }

    pub async fn get_validator_index(
        &self,
        public_key: &[u8],
    ) -> anyhow::Result<DataResponse<ValidatorIndexData>, ValidatorError> {
        let response = self
            .http_client
            .execute(
                self.http_client
                    .post("/eth/v1/validator/index".to_string())?
                    .json(&json!({ "public_key": hex::encode_prefixed(public_key) }))
                    .build()?,
            )
            .await?;

        if !response.status().is_success() {
            return Err(ValidatorError::RequestFailed {
                status_code: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    pub async fn get_attestation_data(
        &self,
        slot: u64,
        shard: u64,
    ) -> anyhow::Result<DataResponse<AttestationData>, ValidatorError> {
        let response = self
            .http_client
            .execute(
                self.http_client
                    .get(format!(
                        "/eth/v1/validator/attestation_data?slot={slot}&shard={shard}"
                    ))?
                    .build()?,
            )
            .await?;

        if !response.status().is_success() {
            return Err(ValidatorError::RequestFailed {
                status_code: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    pub async fn get_attester_duties(
        &self,
        epoch: u64,
        public_keys: &[Vec<u8>],
    ) -> anyhow::Result<DataResponse<Vec<CommitteeAssignment>>, ValidatorError> {
        let response = self
            .http_client
            .execute(
                self.http_client
                    .post(format!("/eth/v1/validator/duties/attester/{epoch}"))?
                    .json(&json!(
                        public_keys
                            .iter()
                            .map(hex::encode_prefixed)
                            .collect::<Vec<_>>()
                    ))
                    .build()?,
            )
            .await?;

        if !response.status().is_success() {
            return Err(ValidatorError::RequestFailed {
                status_code: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    pub async fn publish_attestation(
        &self,
        attestation: &Attestation,
    ) -> anyhow::Result<(), ValidatorError> {
        let response = self
            .http_client
            .execute(
                self.http_client
                    .post("/eth/v1/validator/attestations".to_string())?
                    .json(attestation)
                    .build()?,
            )
            .await?;

        if !response.status().is_success() {
            return Err(ValidatorError::RequestFailed {
                status_code: response.status(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl ValidatorIndexResolver for BeaconApiClient {
    async fn validator_index(&self, public_key: &[u8]) -> anyhow::Result<u64> {
        Ok(self.get_validator_index(public_key).await?.data.index)
    }
}

#[async_trait]
impl AttestationDataFetcher for BeaconApiClient {
    async fn attestation_data(&self, slot: u64, shard: u64) -> anyhow::Result<AttestationData> {
        Ok(self.get_attestation_data(slot, shard).await?.data)
    }
}

#[async_trait]
impl AttestationPublisher for BeaconApiClient {
    async fn submit_attestation(&self, attestation: &Attestation) -> anyhow::Result<()> {
        Ok(self.publish_attestation(attestation).await?)
    }
}

#[async_trait]
impl CommitteeAssignmentSource for BeaconApiClient {
    async fn committee_assignments(
        &self,
        epoch: u64,
        public_keys: &[Vec<u8>],
    ) -> anyhow::Result<Vec<CommitteeAssignment>> {
        Ok(self.get_attester_duties(epoch, public_keys).await?.data)
    }
}
