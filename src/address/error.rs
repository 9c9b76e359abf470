//! Error kinds for the address codec.
//!
//! Every failure is a value; the codec never logs and never panics on bad
//! input. Callers match on the variant to decide whether a failure is
//! user-facing (a mistyped address) or fatal (a bad configured HRP).

use thiserror::Error;

/// Bit-regrouping failure (`ErrBitsInvalidInput`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertBitsError {
    /// Input value at `index` does not fit in `from_bits` bits.
    #[error("value {value} at index {index} does not fit in {from_bits} bits")]
    InvalidValue { value: u8, index: usize, from_bits: u32 },

    /// Leftover bits on a non-padding conversion could not be accounted for.
    #[error("{leftover} leftover bits cannot be dropped without losing data")]
    InvalidPadding { leftover: u32 },

    /// Group widths must lie in 1..=8.
    #[error("unsupported bit widths {from_bits}->{to_bits}")]
    InvalidWidth { from_bits: u32, to_bits: u32 },
}

/// Address codec failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Composite address has no `-` between chain alias and bech32 string.
    #[error("no separator found in address")]
    NoSeparator,

    /// Chain alias contains `-`, so the composite form would not split back.
    #[error("chain alias {0:?} must not contain '-'")]
    InvalidChainAlias(String),

    /// Bech32 string has no `1` between HRP and data.
    #[error("missing '1' separator between human-readable part and data")]
    MissingSeparator,

    #[error("invalid human-readable part: {0}")]
    InvalidHrp(String),

    #[error("string mixes upper and lower case characters")]
    MixedCase,

    #[error("invalid length {len}: {reason}")]
    InvalidLength { len: usize, reason: &'static str },

    #[error("invalid character {ch:?} at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// A group handed to the encoder is wider than 5 bits.
    #[error("group value {value} at index {index} exceeds 5 bits")]
    InvalidGroupValue { value: u8, index: usize },

    #[error("unable to convert address from 8-bit to 5-bit formatting")]
    Bits8To5(#[source] ConvertBitsError),

    #[error("unable to convert address from 5-bit to 8-bit formatting")]
    Bits5To8(#[source] ConvertBitsError),
}
