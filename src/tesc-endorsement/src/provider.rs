//! Offline provider for tooling and tests.

use std::collections::HashMap;

use alloy_primitives::Address;

pub use tesc_types::{ProviderError, Web3Provider};

/// Offline [`Web3Provider`] answering from fixed values.
///
/// Senders without a configured nonce are treated as fresh accounts (nonce 0).
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    nonces: HashMap<Address, u64>,
    gas_price: Option<u128>,
    failure: Option<String>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nonce(mut self, sender: Address, nonce: u64) -> Self {
        self.nonces.insert(sender, nonce);
        self
    }

    pub fn with_gas_price(mut self, wei: u128) -> Self {
        self.gas_price = Some(wei);
        self
    }

    /// Every call fails with [`ProviderError::CallFailed`].
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn check(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(message) => Err(ProviderError::CallFailed(message.clone())),
            None => Ok(()),
        }
    }
}

impl Web3Provider for StaticProvider {
    fn transaction_count(&self, address: Address) -> Result<u64, ProviderError> {
        self.check()?;
        Ok(self.nonces.get(&address).copied().unwrap_or(0))
    }

    fn gas_price(&self) -> Result<u128, ProviderError> {
        self.check()?;
        self.gas_price.ok_or(ProviderError::NotImplemented)
    }
}
