//! Small deterministic helpers shared by the codec and the validators.

pub mod domain;
pub mod hex;
