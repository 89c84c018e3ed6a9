//! Endorsement flags and their on-chain `bytes24` encoding.
//!
//! The on-chain encoding is a string-level operation on the MSB-first binary rendering of the flag
//! vector: a literal `'1'` sentinel character is concatenated after the last binary digit before
//! the string is read back as an integer. Decoding drops the last binary digit again. Contracts
//! already deployed carry this layout, so it must not be reinterpreted as "set bit N+1".

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tesc_types::{Flag, FLAG_COUNT};

use crate::{
    errors::CodecError,
    utils::hex::{pad_hex, strip_0x},
};

/// Width of the on-chain flags field in bytes.
pub const FLAGS_FIELD_BYTES: usize = 24;

const SENTINEL: char = '1';

/// Fixed-width bit vector over the defined [`Flag`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlagSet {
    bits: u8,
}

impl FlagSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Copy with the flag at raw `index` set to `value`.
    pub fn set(self, index: u8, value: bool) -> Result<Self, CodecError> {
        let flag = Flag::try_from(index)?;
        Ok(self.with(flag, value))
    }

    pub fn get(&self, index: u8) -> Result<bool, CodecError> {
        let flag = Flag::try_from(index)?;
        Ok(self.has(flag))
    }

    pub fn with(self, flag: Flag, value: bool) -> Self {
        let mask = 1u8 << flag.index();
        let bits = if value { self.bits | mask } else { self.bits & !mask };
        Self { bits }
    }

    pub fn has(&self, flag: Flag) -> bool {
        self.bits & (1u8 << flag.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Flags currently set, lowest index first.
    pub fn iter(&self) -> impl Iterator<Item = Flag> {
        let flags = *self;
        Flag::ALL.into_iter().filter(move |flag| flags.has(*flag))
    }

    /// MSB-first binary rendering of minimal length; `"0"` when no flag is set.
    pub fn to_binary_string(&self) -> String {
        format!("{:b}", self.bits)
    }

    /// `0x`-prefixed 48 hex digit rendering of the flags with the sentinel appended.
    pub fn to_on_chain_hex(&self) -> String {
        let width = FLAGS_FIELD_BYTES * 2;
        format!("0x{:0>width$x}", self.with_sentinel())
    }

    pub fn to_on_chain_hex_width(&self, width_bytes: usize) -> Result<String, CodecError> {
        pad_hex(&self.with_sentinel(), width_bytes, true)
    }

    /// Binary string with the sentinel concatenated, read back as an integer. Only the sentinel
    /// plus `FLAG_COUNT` flag digits are kept.
    fn with_sentinel(&self) -> u16 {
        let mut binary = self.to_binary_string();
        binary.push(SENTINEL);
        let kept = &binary[binary.len().saturating_sub(FLAG_COUNT + 1)..];
        kept.bytes()
            .fold(0u16, |acc, digit| (acc << 1) | u16::from(digit == b'1'))
    }

    /// Rebuild the flags from their on-chain hex, stripping the sentinel digit.
    pub fn from_on_chain_hex(hex: &str) -> Result<Self, CodecError> {
        let digits = strip_0x(hex);
        if digits.is_empty()
            || digits.len() > FLAGS_FIELD_BYTES * 2
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(CodecError::MalformedHex(hex.to_string()));
        }

        let binary = hex_to_binary_string(digits);
        let flags_binary = &binary[..binary.len() - 1];

        let mut flags = FlagSet::new();
        for (index, digit) in flags_binary.bytes().rev().enumerate() {
            if digit != b'1' {
                continue;
            }
            match u8::try_from(index).ok().and_then(|i| Flag::try_from(i).ok()) {
                Some(flag) => flags = flags.with(flag, true),
                None => tracing::warn!(index, hex, "ignoring unknown flag bit"),
            }
        }
        Ok(flags)
    }
}

/// Minimal MSB-first binary rendering of validated hex digits; `"0"` for zero.
fn hex_to_binary_string(digits: &str) -> String {
    let binary: String = digits
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|nibble| format!("{nibble:04b}"))
        .collect();
    match binary.trim_start_matches('0') {
        "" => "0".to_string(),
        significant => significant.to_string(),
    }
}

/// Serialised as the on-chain hex so JSON matches what the contract stores.
impl Serialize for FlagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_on_chain_hex())
    }
}

impl<'de> Deserialize<'de> for FlagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        FlagSet::from_on_chain_hex(&hex).map_err(de::Error::custom)
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FlagSet::new(), |flags, flag| flags.with(flag, true))
    }
}
