//! RSA-SHA256 endorsement signatures.
//!
//! Signer and verifier both go through [`Claim::format`]; the endorsement is only checkable if the
//! two sides serialise the claim byte-for-byte identically.

use core::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::{
    pkcs1v15::{Signature as RsaSignature, SigningKey, VerifyingKey},
    sha2::Sha256,
    signature::{SignatureEncoding, Signer, Verifier},
};
use serde::{Deserialize, Serialize};

use crate::{
    claim::Claim,
    errors::SignatureError,
    keys::{parse_private_key, parse_public_key},
};

/// Base64 (standard alphabet) RSASSA-PKCS1-v1_5 SHA-256 signature, as stored on-chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn from_base64(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw signature bytes, `None` if the stored text is not valid base64.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        STANDARD.decode(self.0.trim()).ok()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sign the canonical form of `claim` with the RSA private key in `private_key_pem`.
pub fn sign(claim: &Claim, private_key_pem: &str) -> Result<Signature, SignatureError> {
    let private_key = parse_private_key(private_key_pem)?;
    let signing_key = SigningKey::<Sha256>::new(private_key);

    let message = claim.format();
    let signature = signing_key
        .try_sign(message.as_bytes())
        .map_err(|e| SignatureError::SigningError(e.to_string()))?;

    tracing::debug!(claim = %message, "signed endorsement claim");
    Ok(Signature(STANDARD.encode(signature.to_bytes())))
}

/// Check `signature` over the canonical form of `claim` against the RSA public key found in
/// `public_pem` (certificate, SPKI or PKCS#1).
///
/// Signatures that do not decode or do not match yield `Ok(false)`; only unusable key material is
/// an error.
pub fn verify(
    claim: &Claim,
    signature: &Signature,
    public_pem: &str,
) -> Result<bool, SignatureError> {
    let public_key = parse_public_key(public_pem)?;
    let verifying_key = VerifyingKey::<Sha256>::new(public_key);

    let Some(bytes) = signature.to_bytes() else {
        tracing::debug!("signature is not valid base64");
        return Ok(false);
    };
    let Ok(signature) = RsaSignature::try_from(bytes.as_slice()) else {
        return Ok(false);
    };

    let message = claim.format();
    let valid = verifying_key.verify(message.as_bytes(), &signature).is_ok();
    tracing::debug!(claim = %message, valid, "verified endorsement claim");
    Ok(valid)
}
