use alloy_primitives::Address;

/// Errors raised by a [`Web3Provider`]. The endorsement core passes these through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Used by offline providers or partially implemented providers.
    #[error("provider call not implemented")]
    NotImplemented,
    /// The node rejected the call or could not be reached.
    #[error("rpc call failed: {0}")]
    CallFailed(String),
}

/// Chain access needed before an endorsement can be signed, implemented differently by a live
/// RPC client and by offline tooling.
pub trait Web3Provider {
    /// Number of transactions sent from `address`, i.e. the nonce of its next transaction.
    fn transaction_count(&self, address: Address) -> Result<u64, ProviderError>;

    /// Current gas price in wei.
    fn gas_price(&self) -> Result<u128, ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}
