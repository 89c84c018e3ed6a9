//! Claim construction and verification for TLS-endorsed smart contracts (TeSC).
//!
//! A website owner binds a domain to a contract by signing the claim
//! `<contract address>.<domain>.<expiry>.<flags>` with the private key of the domain's TLS
//! certificate. Because the claim is signed before the contract exists, the contract address is
//! predicted from the deployer's next nonce. Anyone holding the certificate can rebuild the claim
//! from on-chain fields and check the signature.

pub mod address;
pub mod claim;
pub mod endorser;
pub mod errors;
pub mod fingerprint;
pub mod flags;
pub mod keys;
pub mod predictor;
pub mod provider;
pub mod signature;
pub mod utils;

#[cfg(test)]
mod tests;

pub use claim::Claim;
pub use endorser::{DeploymentContext, Endorsement, EndorsementRequest, Endorser};
pub use errors::{AddressError, CodecError, EndorseError, SignatureError};
pub use fingerprint::Fingerprint;
pub use flags::FlagSet;
pub use provider::StaticProvider;
pub use signature::Signature;
pub use tesc_types::{Flag, ProviderError, Web3Provider};
