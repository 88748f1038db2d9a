use std::sync::Arc;

use alloy_primitives::Address;
use redb::{Database, Durability, ReadableTable, TableDefinition};

use super::Field;
use crate::errors::StoreError;

/// Table definition for the Deposit_Contract table
///
/// Value: address of the deposit contract on the execution chain
pub const DEPOSIT_CONTRACT_FIELD: TableDefinition<&str, &[u8]> =
    TableDefinition::new("deposit_contract");

pub const DEPOSIT_CONTRACT_KEY: &str = "deposit-contract";

pub struct DepositContractField {
    pub db: Arc<Database>,
}

fn decode_address(bytes: &[u8]) -> Result<Address, StoreError> {
    Address::try_from(bytes).map_err(|err| StoreError::Corrupted(err.to_string()))
}

impl DepositContractField {
    /// Store `address` if none is stored yet, otherwise check that it matches the stored one.
    ///
    /// Runs in a single write transaction so concurrent callers cannot both store an address.
    pub fn verify_or_insert(&self, address: Address) -> Result<(), StoreError> {
        let mut write_txn = self.db.begin_write()?;
        write_txn.set_durability(Durability::Immediate);
        let mut table = write_txn.open_table(DEPOSIT_CONTRACT_FIELD)?;

        let stored = table
            .get(DEPOSIT_CONTRACT_KEY)?
            .map(|value| decode_address(value.value()))
            .transpose()?;

        match stored {
            Some(expected) if expected != address => {
                return Err(StoreError::DepositContractMismatch {
                    expected,
                    found: address,
                });
            }
            Some(_) => {}
            None => {
                table.insert(DEPOSIT_CONTRACT_KEY, address.as_slice())?;
            }
        }

        drop(table);
        write_txn.commit()?;
        Ok(())
    }
}

impl Field for DepositContractField {
    type Value = Address;

    fn get(&self) -> Result<Address, StoreError> {
        let read_txn = self.db.begin_read()?;

        let table = read_txn.open_table(DEPOSIT_CONTRACT_FIELD)?;
        let result = table
            .get(DEPOSIT_CONTRACT_KEY)?
            .ok_or(StoreError::FieldNotInitilized)?;
        decode_address(result.value())
    }

    fn insert(&self, value: Self::Value) -> Result<(), StoreError> {
        let mut write_txn = self.db.begin_write()?;
        write_txn.set_durability(Durability::Immediate);
        let mut table = write_txn.open_table(DEPOSIT_CONTRACT_FIELD)?;
        table.insert(DEPOSIT_CONTRACT_KEY, value.as_slice())?;
        drop(table);
        write_txn.commit()?;
        Ok(())
    }
}
