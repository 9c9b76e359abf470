//! Address codec
//!
//! Composite addresses have the form `<chain-alias>-<hrp>1<data><checksum>`:
//! a caller-chosen chain alias, a dash, and a bech32 string whose data part is
//! the payload bytes regrouped into 5-bit values.
//!
//! All operations are pure and may be called from any thread.

pub mod bech32;
pub mod bits;
pub mod codec;
pub mod error;

pub use bech32::{decode, encode, Bech32Limits, CHECKSUM_LEN, SEPARATOR};
pub use bits::convert_bits;
pub use codec::{format, parse, AddressCodec, Padding, ParsedAddress, ADDRESS_SEP};
pub use error::{AddressError, ConvertBitsError};
