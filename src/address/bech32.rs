// Bech32 (BIP-173) checksummed text codec
// - HRP: printable ASCII 33..=126, single case
// - Separator: last '1' in the string
// - Data: 5-bit groups rendered through CHARSET, followed by 6 checksum groups

use super::error::AddressError;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];
const BECH32_CONST: u32 = 1;

/// Number of checksum characters appended to the data part.
pub const CHECKSUM_LEN: usize = 6;
/// Separator between the human-readable part and the data part.
pub const SEPARATOR: char = '1';

/// Default maximum length of a full bech32 string.
pub const DEFAULT_MAX_LEN: usize = 90;
/// Default maximum length of the human-readable part.
pub const DEFAULT_MAX_HRP_LEN: usize = 83;

fn charset_index(ch: u8) -> Option<u8> {
    CHARSET.iter().position(|&c| c == ch).map(|i| i as u8)
}

fn hrp_expand(hrp: &[u8]) -> Vec<u8> {
    let mut ret = Vec::with_capacity(hrp.len() * 2 + 1);
    for b in hrp {
        ret.push(*b >> 5);
    }
    ret.push(0);
    for b in hrp {
        ret.push(*b & 0x1f);
    }
    ret
}

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for v in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ffffff) << 5) ^ (*v as u32);
        for (i, g) in GENERATOR.iter().enumerate() {
            if ((top >> i) & 1) != 0 {
                chk ^= g;
            }
        }
    }
    chk
}

fn create_checksum(hrp: &[u8], data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; CHECKSUM_LEN]);
    let pm = polymod(&values) ^ BECH32_CONST;
    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, c) in checksum.iter_mut().enumerate() {
        *c = ((pm >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8;
    }
    checksum
}

fn verify_checksum(hrp: &[u8], data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == BECH32_CONST
}

/// Length bounds applied by [`encode`](Bech32Limits::encode) and
/// [`decode`](Bech32Limits::decode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bech32Limits {
    /// Maximum length of the whole string, HRP and checksum included.
    pub max_len: usize,
    /// Maximum length of the human-readable part.
    pub max_hrp_len: usize,
}

impl Default for Bech32Limits {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            max_hrp_len: DEFAULT_MAX_HRP_LEN,
        }
    }
}

impl Bech32Limits {
    pub fn new(max_len: usize, max_hrp_len: usize) -> Self {
        Self {
            max_len,
            max_hrp_len,
        }
    }

    fn check_hrp(&self, hrp: &str) -> Result<(), AddressError> {
        if hrp.is_empty() {
            return Err(AddressError::InvalidHrp("empty".to_string()));
        }
        if hrp.len() > self.max_hrp_len {
            return Err(AddressError::InvalidHrp(format!(
                "{} characters exceeds limit of {}",
                hrp.len(),
                self.max_hrp_len
            )));
        }
        if let Some(ch) = hrp.chars().find(|c| !matches!(*c as u32, 33..=126)) {
            return Err(AddressError::InvalidHrp(format!(
                "character {:?} outside printable ASCII",
                ch
            )));
        }
        Ok(())
    }

    /// Encode `hrp` and 5-bit `groups` into a lower-case bech32 string.
    pub fn encode(&self, hrp: &str, groups: &[u8]) -> Result<String, AddressError> {
        self.check_hrp(hrp)?;
        let has_lower = hrp.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = hrp.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(AddressError::InvalidHrp("mixed case".to_string()));
        }
        if let Some((index, value)) = groups.iter().enumerate().find(|(_, g)| **g >= 32) {
            return Err(AddressError::InvalidGroupValue {
                value: *value,
                index,
            });
        }

        let len = hrp.len() + 1 + groups.len() + CHECKSUM_LEN;
        if len > self.max_len {
            return Err(AddressError::InvalidLength {
                len,
                reason: "encoded string exceeds maximum length",
            });
        }

        let hrp = hrp.to_ascii_lowercase();
        let checksum = create_checksum(hrp.as_bytes(), groups);
        let mut out = String::with_capacity(len);
        out.push_str(&hrp);
        out.push(SEPARATOR);
        for d in groups.iter().chain(checksum.iter()) {
            out.push(CHARSET[*d as usize] as char);
        }
        Ok(out)
    }

    /// Decode a bech32 string into its lower-cased HRP and 5-bit data groups,
    /// checksum stripped.
    pub fn decode(&self, text: &str) -> Result<(String, Vec<u8>), AddressError> {
        if text.len() > self.max_len {
            return Err(AddressError::InvalidLength {
                len: text.len(),
                reason: "string exceeds maximum length",
            });
        }
        if let Some((pos, ch)) = text.char_indices().find(|(_, c)| !c.is_ascii()) {
            return Err(AddressError::InvalidCharacter { ch, pos });
        }
        let has_lower = text.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = text.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(AddressError::MixedCase);
        }

        let text = text.to_ascii_lowercase();
        let sep = text.rfind(SEPARATOR).ok_or(AddressError::MissingSeparator)?;
        let (hrp, data_part) = (&text[..sep], &text[sep + 1..]);
        self.check_hrp(hrp)?;
        if data_part.len() < CHECKSUM_LEN {
            return Err(AddressError::InvalidLength {
                len: data_part.len(),
                reason: "data part shorter than checksum",
            });
        }

        let mut data: Vec<u8> = Vec::with_capacity(data_part.len());
        for (i, b) in data_part.bytes().enumerate() {
            let Some(idx) = charset_index(b) else {
                return Err(AddressError::InvalidCharacter {
                    ch: b as char,
                    pos: sep + 1 + i,
                });
            };
            data.push(idx);
        }

        if !verify_checksum(hrp.as_bytes(), &data) {
            return Err(AddressError::ChecksumMismatch);
        }
        data.truncate(data.len() - CHECKSUM_LEN);
        Ok((hrp.to_string(), data))
    }
}

/// Encode with the default limits.
pub fn encode(hrp: &str, groups: &[u8]) -> Result<String, AddressError> {
    Bech32Limits::default().encode(hrp, groups)
}

/// Decode with the default limits.
pub fn decode(text: &str) -> Result<(String, Vec<u8>), AddressError> {
    Bech32Limits::default().decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hrp_expand_layout() {
        assert_eq!(hrp_expand(b"bc"), vec![3, 3, 0, 2, 3]);
    }

    #[test]
    fn test_checksum_roundtrip_empty_data() {
        let s = encode("cryft", &[]).unwrap();
        assert_eq!(s, "cryft1a7cwrm");
        let (hrp, data) = decode(&s).unwrap();
        assert_eq!(hrp, "cryft");
        assert!(data.is_empty());
    }

    #[test]
    fn test_encode_lowercases_upper_hrp() {
        let upper = encode("CRYFT", &[2, 8, 26, 5, 12]).unwrap();
        let lower = encode("cryft", &[2, 8, 26, 5, 12]).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower, "cryft1zg69vrcdnvy");
    }

    #[test]
    fn test_decode_accepts_upper_case() {
        let (hrp, data) = decode("CRYFT1ZG69VRCDNVY").unwrap();
        assert_eq!(hrp, "cryft");
        assert_eq!(data, vec![2, 8, 26, 5, 12]);
    }

    #[test]
    fn test_encode_rejects_bad_hrp() {
        assert!(matches!(encode("", &[]), Err(AddressError::InvalidHrp(_))));
        assert!(matches!(encode("cr yft", &[]), Err(AddressError::InvalidHrp(_))));
        assert!(matches!(encode("Cryft", &[]), Err(AddressError::InvalidHrp(_))));
        let long = "a".repeat(DEFAULT_MAX_HRP_LEN + 1);
        assert!(matches!(encode(&long, &[]), Err(AddressError::InvalidHrp(_))));
    }

    #[test]
    fn test_encode_rejects_wide_group() {
        assert_eq!(
            encode("cryft", &[1, 31, 32]),
            Err(AddressError::InvalidGroupValue { value: 32, index: 2 })
        );
    }

    #[test]
    fn test_encode_enforces_max_len() {
        // 5 + 1 + 79 + 6 = 91
        let groups = vec![0u8; 79];
        assert!(matches!(
            encode("cryft", &groups),
            Err(AddressError::InvalidLength { len: 91, .. })
        ));
        assert!(encode("cryft", &groups[..78]).is_ok());
    }

    #[test]
    fn test_custom_limits_allow_longer_strings() {
        let limits = Bech32Limits::new(200, 83);
        let groups = vec![7u8; 150];
        let s = limits.encode("cryft", &groups).unwrap();
        assert_eq!(s.len(), 5 + 1 + 150 + 6);
        assert_eq!(limits.decode(&s).unwrap().1, groups);
        assert!(matches!(decode(&s), Err(AddressError::InvalidLength { .. })));
    }

    #[test]
    fn test_decode_reports_character_position() {
        // 'b' is not in the alphabet
        assert_eq!(
            decode("x1b4n0q5v"),
            Err(AddressError::InvalidCharacter { ch: 'b', pos: 2 })
        );
    }
}
