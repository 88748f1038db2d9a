pub mod constants;
pub mod errors;
pub mod private_key;
pub mod pubkey;
pub mod signature;
pub mod traits;

pub use private_key::PrivateKey;
pub use pubkey::PubKey;
pub use signature::BLSSignature;
