//! Address validation for user-typed contract addresses.

use alloy_primitives::Address;

use crate::{errors::AddressError, utils::hex::decode_fixed};

/// Validate `address`, reporting the first failing check:
/// presence, `0x` prefix, hex digits, length, then EIP-55 checksum casing.
///
/// The casing must match the checksum exactly, so an all-lowercase address is rejected.
pub fn validate(address: &str) -> Result<Address, AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }
    let Some(body) = address.strip_prefix("0x") else {
        return Err(AddressError::MissingPrefix);
    };
    if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressError::NonHexCharacter);
    }
    if address.len() != 42 {
        return Err(AddressError::InvalidLength);
    }

    let bytes: [u8; 20] = decode_fixed(body).map_err(|_| AddressError::InvalidLength)?;
    let parsed = Address::from(bytes);
    if parsed.to_checksum(None) != address {
        return Err(AddressError::ChecksumMismatch);
    }
    Ok(parsed)
}

pub fn is_valid(address: &str) -> bool {
    validate(address).is_ok()
}

/// EIP-55 text form.
pub fn to_checksum(address: &Address) -> String {
    address.to_checksum(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn accepts_checksummed_addresses() {
        for address in CHECKSUMMED {
            let parsed = validate(address).unwrap();
            assert_eq!(to_checksum(&parsed), address);
            assert!(is_valid(address));
        }
    }

    #[test]
    fn rejects_wrong_casing() {
        for address in CHECKSUMMED {
            let lower = format!("0x{}", address[2..].to_ascii_lowercase());
            assert_eq!(validate(&lower), Err(AddressError::ChecksumMismatch));
            let upper = format!("0x{}", address[2..].to_ascii_uppercase());
            assert_eq!(validate(&upper), Err(AddressError::ChecksumMismatch));
        }
    }

    #[test]
    fn reports_first_failing_check() {
        assert_eq!(validate(""), Err(AddressError::Empty));
        assert_eq!(
            validate("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
            Err(AddressError::MissingPrefix)
        );
        assert_eq!(
            validate("0X5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
            Err(AddressError::MissingPrefix)
        );
        // non-hex wins over length
        assert_eq!(validate("0xzz"), Err(AddressError::NonHexCharacter));
        assert_eq!(
            validate("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeg"),
            Err(AddressError::NonHexCharacter)
        );
        assert_eq!(validate("0x"), Err(AddressError::InvalidLength));
        assert_eq!(validate("0x1234"), Err(AddressError::InvalidLength));
        assert_eq!(
            validate("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed00"),
            Err(AddressError::InvalidLength)
        );
    }

    #[test]
    fn reasons_are_user_facing() {
        assert_eq!(AddressError::MissingPrefix.to_string(), "Address must start with 0x");
        assert_eq!(
            AddressError::ChecksumMismatch.to_string(),
            "Address checksum does not match"
        );
    }
}
