//! Composite `<chain-alias>-<bech32>` addresses.

use super::bech32::Bech32Limits;
use super::bits::convert_bits;
use super::error::AddressError;

/// Separator between the chain alias and the bech32 string.
pub const ADDRESS_SEP: char = '-';

/// How trailing bits are treated when regrouping decoded 5-bit data into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Reject leftover bits that are a full byte's worth or nonzero; drop the
    /// zero padding the encoder added.
    #[default]
    Strict,
    /// Zero-fill leftover bits into a final byte. Payloads whose bit length
    /// is not a multiple of 5 come back with a trailing zero byte.
    Permissive,
}

impl Padding {
    fn pad(self) -> bool {
        matches!(self, Padding::Permissive)
    }
}

/// Components recovered from a composite address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub chain_alias: String,
    pub hrp: String,
    pub payload: Vec<u8>,
}

/// Address codec carrying its length limits and decode padding policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressCodec {
    pub limits: Bech32Limits,
    pub padding: Padding,
}

impl AddressCodec {
    pub fn new(limits: Bech32Limits, padding: Padding) -> Self {
        Self { limits, padding }
    }

    /// Bech32-encode 5-bit groups.
    pub fn encode(&self, hrp: &str, groups: &[u8]) -> Result<String, AddressError> {
        self.limits.encode(hrp, groups)
    }

    /// Bech32-decode into HRP and 5-bit groups.
    pub fn decode(&self, text: &str) -> Result<(String, Vec<u8>), AddressError> {
        self.limits.decode(text)
    }

    /// Bech32 string for raw payload bytes, without a chain alias.
    pub fn format_bech32(&self, hrp: &str, payload: &[u8]) -> Result<String, AddressError> {
        let five_bits = convert_bits(payload, 8, 5, true).map_err(AddressError::Bits8To5)?;
        self.encode(hrp, &five_bits)
    }

    /// HRP and payload bytes of a bare bech32 string.
    pub fn parse_bech32(&self, text: &str) -> Result<(String, Vec<u8>), AddressError> {
        let (hrp, groups) = self.decode(text)?;
        let payload =
            convert_bits(&groups, 5, 8, self.padding.pad()).map_err(AddressError::Bits5To8)?;
        Ok((hrp, payload))
    }

    /// `chain_alias` must not contain `-`: parsing splits on the first one.
    pub fn format(
        &self,
        chain_alias: &str,
        hrp: &str,
        payload: &[u8],
    ) -> Result<String, AddressError> {
        if chain_alias.contains(ADDRESS_SEP) {
            return Err(AddressError::InvalidChainAlias(chain_alias.to_string()));
        }
        let encoded = self.format_bech32(hrp, payload)?;
        Ok(format!("{}{}{}", chain_alias, ADDRESS_SEP, encoded))
    }

    /// Split on the first `-` and decode the remainder.
    pub fn parse(&self, address: &str) -> Result<ParsedAddress, AddressError> {
        let (chain_alias, raw) = address
            .split_once(ADDRESS_SEP)
            .ok_or(AddressError::NoSeparator)?;
        let (hrp, payload) = self.parse_bech32(raw)?;
        Ok(ParsedAddress {
            chain_alias: chain_alias.to_string(),
            hrp,
            payload,
        })
    }

    /// Composite form of `parsed` under this codec's limits.
    ///
    /// With [`Padding::Permissive`] the payload may carry a zero tail added by
    /// `parse`, so the result is not guaranteed to equal the parsed string.
    pub fn render(&self, parsed: &ParsedAddress) -> Result<String, AddressError> {
        self.format(&parsed.chain_alias, &parsed.hrp, &parsed.payload)
    }
}

/// `chain_alias + "-" + bech32(hrp, payload)` with default limits.
pub fn format(chain_alias: &str, hrp: &str, payload: &[u8]) -> Result<String, AddressError> {
    AddressCodec::default().format(chain_alias, hrp, payload)
}

/// Inverse of [`format`] with default limits and strict padding.
pub fn parse(address: &str) -> Result<ParsedAddress, AddressError> {
    AddressCodec::default().parse(address)
}
