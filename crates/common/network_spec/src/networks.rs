use std::{
    sync::{Arc, LazyLock},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Dev,
    Custom(String),
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "dev" => Ok(Network::Dev),
            custom => Ok(Network::Custom(custom.to_string())),
        }
    }
}

fn custom_network() -> Network {
    Network::Custom("custom".to_string())
}

/// Timing parameters of the chain the validator attests on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct NetworkSpec {
    #[serde(rename = "CONFIG_NAME", default = "custom_network")]
    pub network: Network,
    /// Seconds since the UNIX epoch at which slot 0 starts.
    pub genesis_time: u64,
    pub seconds_per_slot: u64,
    pub slots_per_epoch: u64,
}

impl NetworkSpec {
    /// Reject parameters the slot clock cannot run on.
    pub fn validate(&self) -> Result<(), String> {
        if self.seconds_per_slot == 0 {
            return Err("SECONDS_PER_SLOT must be greater than zero".to_string());
        }
        if self.slots_per_epoch == 0 {
            return Err("SLOTS_PER_EPOCH must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::from_secs(self.seconds_per_slot)
    }

    /// Default point within a slot at which attestations are produced: halfway through, giving
    /// the slot's block time to propagate.
    pub fn attestation_delay(&self) -> Duration {
        self.slot_duration() / 2
    }

    pub fn compute_epoch_at_slot(&self, slot: u64) -> u64 {
        slot / self.slots_per_epoch
    }

    pub fn compute_start_slot_at_epoch(&self, epoch: u64) -> u64 {
        epoch * self.slots_per_epoch
    }
}

pub static MAINNET: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    NetworkSpec {
        network: Network::Mainnet,
        genesis_time: 1606824023,
        seconds_per_slot: 12,
        slots_per_epoch: 32,
    }
    .into()
});

/// Local development chain starting at process start-up.
pub static DEV: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    let genesis_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default();

    NetworkSpec {
        network: Network::Dev,
        genesis_time,
        seconds_per_slot: 6,
        slots_per_epoch: 8,
    }
    .into()
});
