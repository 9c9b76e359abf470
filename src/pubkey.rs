//! Payload sources
//!
//! The codec only ever sees bytes. These types produce them: either raw bytes
//! handed over by the caller, or the 20-byte hash of a secp256k1 public key.
//!
//! Hash formula: payload = RIPEMD160(SHA256(x || y)), where `x || y` is the
//! uncompressed public key without its 0x04 tag byte.

use anyhow::{anyhow, Context, Result};
use ripemd::Ripemd160;
use secp256k1::PublicKey;
use sha2::{Digest, Sha256};

/// Something that can supply address payload bytes.
pub trait PayloadSource {
    fn payload(&self) -> Result<Vec<u8>>;
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(s).with_context(|| format!("invalid hex '{}'", s))
}

/// Caller-supplied payload bytes, returned as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload(pub Vec<u8>);

impl RawPayload {
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Self(decode_hex(s)?))
    }
}

impl PayloadSource for RawPayload {
    fn payload(&self) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let digest = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}

/// Public key whose hash becomes the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyHash {
    key: PublicKey,
}

impl PublicKeyHash {
    /// Accepts 33-byte compressed or 65-byte uncompressed SEC1 encodings.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key = PublicKey::from_slice(bytes)
            .map_err(|e| anyhow!("invalid secp256k1 public key ({} bytes): {}", bytes.len(), e))?;
        Ok(Self { key })
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_slice(&decode_hex(s)?)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.key
    }

    pub fn hash(&self) -> [u8; 20] {
        let uncompressed = self.key.serialize_uncompressed();
        hash160(&uncompressed[1..])
    }
}

impl PayloadSource for PublicKeyHash {
    fn payload(&self) -> Result<Vec<u8>> {
        Ok(self.hash().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // secp256k1 generator point
    const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_hash160_bitcoin_vector() {
        let bytes = hex::decode(G_COMPRESSED).unwrap();
        assert_eq!(
            hex::encode(hash160(&bytes)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_pubkey_hash_ignores_input_encoding() {
        let a = PublicKeyHash::from_hex(G_COMPRESSED).unwrap();
        let b = PublicKeyHash::from_hex(&format!("0x{}", G_UNCOMPRESSED)).unwrap();
        assert_eq!(a.hash(), b.hash());
        assert_eq!(
            hex::encode(a.payload().unwrap()),
            "c862aeeb8429dc25a798ba51a422b43d7e712606"
        );
    }

    #[test]
    fn test_rejects_off_curve_key() {
        let mut bytes = hex::decode(G_COMPRESSED).unwrap();
        bytes[0] = 0x05;
        assert!(PublicKeyHash::from_slice(&bytes).is_err());
        assert!(PublicKeyHash::from_hex("zz").is_err());
    }

    #[test]
    fn test_raw_payload_hex() {
        let raw = RawPayload::from_hex(" 0x123456 ").unwrap();
        assert_eq!(raw.payload().unwrap(), vec![0x12, 0x34, 0x56]);
    }
}
