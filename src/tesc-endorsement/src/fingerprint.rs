use core::{fmt, str::FromStr};

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use x509_cert::der::Encode;

use crate::{
    errors::{CodecError, SignatureError},
    keys::parse_certificate,
    utils::hex::decode_fixed,
};

/// SHA-256 of a TLS certificate, stored on-chain as `bytes32`.
///
/// Used by verifiers as a fallback anchor when the live certificate cannot be fetched. The zero
/// value means no fingerprint was provided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(pub B256);

impl Fingerprint {
    pub const ABSENT: Fingerprint = Fingerprint(B256::ZERO);

    /// Parse a hex fingerprint; short values such as `0x0` are left-padded.
    pub fn parse(value: &str) -> Result<Self, CodecError> {
        let bytes: [u8; 32] = decode_fixed(value)?;
        Ok(Self(B256::from(bytes)))
    }

    /// Fingerprint of the first certificate in `pem`.
    pub fn of_certificate_pem(pem: &str) -> Result<Self, SignatureError> {
        let certificate = parse_certificate(pem)?;
        let der = certificate.to_der().map_err(|_| SignatureError::InvalidPublicKey)?;
        let digest: [u8; 32] = Sha256::digest(&der).into();
        Ok(Self(B256::from(digest)))
    }

    pub fn is_absent(&self) -> bool {
        self.0 == B256::ZERO
    }
}

impl FromStr for Fingerprint {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
