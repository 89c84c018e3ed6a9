use core::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tesc_types::Flag;

use crate::{
    flags::FlagSet,
    utils::domain::{hash_domain, is_hash_commitment},
};

/// The tuple a TeSC endorsement signs: which contract, for which domain, until when, with which
/// capabilities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub contract_address: Address,
    /// Domain as stored on-chain: either plain or its hash commitment.
    pub domain: String,
    /// Unix timestamp in seconds.
    pub expiry: u64,
    pub flags: FlagSet,
}

impl Claim {
    pub fn new(
        contract_address: Address,
        domain: impl Into<String>,
        expiry: u64,
        flags: FlagSet,
    ) -> Self {
        Self {
            contract_address,
            domain: domain.into(),
            expiry,
            flags,
        }
    }

    /// Claim for a new endorsement. With `DOMAIN_HASHED` set, a plain domain is replaced by its
    /// keccak256 commitment so the claim matches what the contract stores.
    pub fn for_endorsement(
        contract_address: Address,
        domain: &str,
        expiry: u64,
        flags: FlagSet,
    ) -> Self {
        let domain = if flags.has(Flag::DomainHashed) && !is_hash_commitment(domain) {
            hash_domain(domain)
        } else {
            domain.to_string()
        };
        Self::new(contract_address, domain, expiry, flags)
    }

    /// Canonical `<address>.<domain>.<expiry>.<flags>` string that is signed and verified.
    ///
    /// Fields are not escaped; the domain's own dots are kept as-is.
    pub fn format(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.contract_address.to_checksum(None),
            self.domain,
            self.expiry,
            self.flags.to_on_chain_hex()
        )
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
