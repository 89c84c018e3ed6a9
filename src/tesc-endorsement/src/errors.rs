pub use tesc_types::{InvalidFlagIndex, ProviderError};

/// Errors while encoding or decoding on-chain fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    InvalidFlagIndex(#[from] InvalidFlagIndex),
    /// The value needs more hex digits than the fixed-width field holds.
    #[error("value needs {digits} hex digits but the field holds {max}")]
    ValueTooLarge { digits: usize, max: usize },
    #[error("malformed hex `{0}`")]
    MalformedHex(String),
    /// A flags field handed over next to a claim differs from the claim's own flags.
    #[error("flags field `{field}` does not match the signed flags `{signed}`")]
    FlagsMismatch { field: String, signed: String },
}

/// Errors while signing or checking a claim signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("could not parse RSA private key from PEM")]
    InvalidPrivateKey,
    #[error("could not parse RSA public key or certificate from PEM")]
    InvalidPublicKey,
    #[error("signing failed: {0}")]
    SigningError(String),
}

/// Reasons an address string is rejected, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Address is required")]
    Empty,
    #[error("Address must start with 0x")]
    MissingPrefix,
    #[error("Address contains non-hexadecimal characters")]
    NonHexCharacter,
    #[error("Address must be 42 characters long")]
    InvalidLength,
    #[error("Address checksum does not match")]
    ChecksumMismatch,
}

/// Errors from the endorsement workflow.
#[derive(Debug, thiserror::Error)]
pub enum EndorseError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
