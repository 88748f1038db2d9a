pub mod attestation;
pub mod attestation_duty;
pub mod beacon_api_client;
pub mod beacon_node;
pub mod duty;
pub mod errors;
pub mod registry;
pub mod signer;
pub mod submitter;
pub mod timing;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_utils;
