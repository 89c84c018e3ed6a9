//! Domain helpers.
//!
//! Domains are treated as plain dot-separated labels. There is no public-suffix awareness: the
//! last two labels are always taken as the registrable domain, so `shop.example.co.uk` yields
//! `shop.example` as its subdomain.

use alloy_primitives::keccak256;

/// True iff `value` looks like a keccak256 commitment (`0x` + 64 hex digits) rather than a domain.
pub fn is_hash_commitment(value: &str) -> bool {
    value.len() == 66
        && value.starts_with("0x")
        && value[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Labels preceding the last two, joined with `.`. Empty for two labels or fewer.
pub fn extract_subdomain(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() <= 2 {
        return String::new();
    }
    labels[..labels.len() - 2].join(".")
}

/// Commitment stored on-chain in place of the domain when `DOMAIN_HASHED` is set.
pub fn hash_domain(domain: &str) -> String {
    format!("{:#x}", keccak256(domain.as_bytes()))
}
