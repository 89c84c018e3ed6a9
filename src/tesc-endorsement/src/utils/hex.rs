//! Fixed-width hex helpers for on-chain fields.

use alloy_primitives::U256;

use crate::errors::CodecError;

/// Values that can be rendered as lowercase hex digits without a prefix.
pub trait HexDigits {
    fn hex_digits(&self) -> Result<String, CodecError>;
}

impl HexDigits for str {
    /// Accepts `0x`/`0X`-prefixed or bare hex in any case.
    fn hex_digits(&self) -> Result<String, CodecError> {
        let digits = strip_0x(self);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::MalformedHex(self.to_string()));
        }
        Ok(digits.to_ascii_lowercase())
    }
}

impl HexDigits for String {
    fn hex_digits(&self) -> Result<String, CodecError> {
        self.as_str().hex_digits()
    }
}

macro_rules! impl_hex_digits_uint {
    ($($t:ty),*) => {
        $(
            impl HexDigits for $t {
                fn hex_digits(&self) -> Result<String, CodecError> {
                    Ok(format!("{:x}", self))
                }
            }
        )*
    };
}

impl_hex_digits_uint!(u8, u16, u32, u64, u128, U256);

/// Left-pad `value` with zeros to exactly `byte_width * 2` hex digits.
///
/// Leading zeros of the input are not significant. Values with more significant digits than the
/// field holds are rejected rather than truncated.
pub fn pad_hex<V: HexDigits + ?Sized>(
    value: &V,
    byte_width: usize,
    prefixed: bool,
) -> Result<String, CodecError> {
    let digits = value.hex_digits()?;
    let significant = digits.trim_start_matches('0');
    let max = byte_width * 2;
    if significant.len() > max {
        return Err(CodecError::ValueTooLarge {
            digits: significant.len(),
            max,
        });
    }
    let prefix = if prefixed { "0x" } else { "" };
    Ok(format!("{prefix}{significant:0>max$}"))
}

/// Decode a hex value into exactly `N` bytes, left-padding short values.
pub fn decode_fixed<const N: usize>(value: &str) -> Result<[u8; N], CodecError> {
    let padded = pad_hex(value, N, false)?;
    let mut out = [0u8; N];
    ::hex::decode_to_slice(&padded, &mut out)
        .map_err(|_| CodecError::MalformedHex(value.to_string()))?;
    Ok(out)
}

pub fn strip_0x(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}
