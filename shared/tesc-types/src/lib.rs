//! Shared types for TeSC endorsements.
//!
//! Kept free of crypto dependencies so that UI glue and tooling can name flags and implement the
//! provider capability without pulling in the signing stack.

pub mod flags;
pub mod provider;

pub use flags::{Flag, InvalidFlagIndex, UnknownFlag, FLAG_COUNT};
pub use provider::{ProviderError, Web3Provider};
