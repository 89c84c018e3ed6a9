//! Prediction of the address a contract will be deployed to.
//!
//! The claim embeds the contract address, and the claim is signed before the deployment
//! transaction is sent, so the address is derived the way the network derives `CREATE` addresses:
//! the low 20 bytes of `keccak256(rlp([sender, nonce]))`.

use alloy_primitives::{keccak256, Address};
use alloy_rlp::RlpEncodable;
use tesc_types::{ProviderError, Web3Provider};

#[derive(RlpEncodable)]
struct CreateInput {
    sender: Address,
    nonce: u64,
}

/// Address of the contract created by `sender`'s transaction with `nonce`.
pub fn predict(sender: Address, nonce: u64) -> Address {
    let encoded = alloy_rlp::encode(CreateInput { sender, nonce });
    let digest = keccak256(&encoded);
    Address::from_slice(&digest[12..])
}

/// Predict the address of the contract created by `sender`'s next transaction.
///
/// Provider failures are returned unchanged; retrying is up to the caller.
pub fn predict_next<P: Web3Provider>(
    provider: &P,
    sender: Address,
) -> Result<(u64, Address), ProviderError> {
    let nonce = provider.transaction_count(sender)?;
    let predicted = predict(sender, nonce);
    tracing::debug!(%sender, nonce, %predicted, "predicted contract address");
    Ok((nonce, predicted))
}
