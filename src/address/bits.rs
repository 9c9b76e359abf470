//! Bit-regrouping between group widths.
//!
//! Bytes are treated as a big-endian bit stream and repacked into groups of
//! `to_bits` bits. The 8->5 direction feeds the bech32 encoder, 5->8 recovers
//! the payload after decoding.

use super::error::ConvertBitsError;

/// Repack `data` from `from_bits`-wide groups into `to_bits`-wide groups.
///
/// With `pad` set, trailing bits are zero-filled into one final group.
/// Without it, leftover bits must be fewer than `from_bits` and all zero,
/// otherwise the input is rejected.
pub fn convert_bits(
    data: &[u8],
    from_bits: u32,
    to_bits: u32,
    pad: bool,
) -> Result<Vec<u8>, ConvertBitsError> {
    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Err(ConvertBitsError::InvalidWidth { from_bits, to_bits });
    }

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let maxv: u32 = (1 << to_bits) - 1;
    // only the bits not yet emitted are kept in the accumulator
    let max_acc: u32 = (1 << (from_bits + to_bits - 1)) - 1;
    let mut ret: Vec<u8> = Vec::with_capacity(data.len() * from_bits as usize / to_bits as usize + 1);

    for (index, value) in data.iter().enumerate() {
        let v = *value as u32;
        if (v >> from_bits) != 0 {
            return Err(ConvertBitsError::InvalidValue {
                value: *value,
                index,
                from_bits,
            });
        }
        acc = ((acc << from_bits) | v) & max_acc;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            ret.push(((acc >> bits) & maxv) as u8);
        }
    }

    if pad {
        if bits > 0 {
            ret.push(((acc << (to_bits - bits)) & maxv) as u8);
        }
    } else if bits >= from_bits || ((acc << (to_bits - bits)) & maxv) != 0 {
        return Err(ConvertBitsError::InvalidPadding { leftover: bits });
    }

    Ok(ret)
}
