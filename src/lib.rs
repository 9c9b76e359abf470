//! Cryft address tooling
//!
//! - [`address`]: bit regrouping, bech32 codec and chain-alias composite addresses
//! - [`config`]: TOML + environment configuration
//! - [`pubkey`]: payload sources (raw bytes, secp256k1 public key hash)

pub mod address;
pub mod config;
pub mod pubkey;

pub use address::{
    convert_bits, decode, encode, format, parse, AddressCodec, AddressError, Bech32Limits,
    ConvertBitsError, Padding, ParsedAddress,
};
