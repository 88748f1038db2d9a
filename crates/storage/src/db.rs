use std::{path::PathBuf, sync::Arc};

use alloy_primitives::Address;
use redb::{Builder, Database};
use tracing::info;

use crate::{
    dir,
    errors::StoreError,
    tables::{
        Field,
        deposit_contract::{DEPOSIT_CONTRACT_FIELD, DepositContractField},
    },
};

pub const APP_NAME: &str = "ream";

pub const REDB_FILE: &str = "ream.redb";

/// The size of the cache for the database
///
/// 16 MiB
pub const REDB_CACHE_SIZE: usize = 16 * 1_024 * 1_024;

#[derive(Clone, Debug)]
pub struct ReamDB {
    pub db: Arc<Database>,
    pub data_dir: PathBuf,
}

impl ReamDB {
    pub fn new(data_dir: Option<PathBuf>, ephemeral: bool) -> Result<Self, StoreError> {
        let ream_dir =
            dir::setup_data_dir(APP_NAME, data_dir, ephemeral).map_err(StoreError::Io)?;

        let ream_file = ream_dir.join(REDB_FILE);

        let db = Builder::new()
            .set_cache_size(REDB_CACHE_SIZE)
            .create(&ream_file)?;

        let write_txn = db.begin_write()?;
        write_txn.open_table(DEPOSIT_CONTRACT_FIELD)?;
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            data_dir: ream_dir,
        })
    }

    pub fn deposit_contract_provider(&self) -> DepositContractField {
        DepositContractField {
            db: self.db.clone(),
        }
    }

    /// The deposit contract address this database was created for, if any.
    pub fn deposit_contract_address(&self) -> Result<Option<Address>, StoreError> {
        match self.deposit_contract_provider().get() {
            Ok(address) => Ok(Some(address)),
            Err(StoreError::FieldNotInitilized) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Check that the database was built against the deposit contract at `address`.
    ///
    /// The first call stores `address`. A mismatch means every stored value is derived from a
    /// different chain and the data directory has to be cleared before the node can run.
    pub fn verify_deposit_contract_address(&self, address: Address) -> Result<(), StoreError> {
        self.deposit_contract_provider().verify_or_insert(address)?;
        info!("Deposit contract address verified: {address}");
        Ok(())
    }
}
