// SPDX-License-Identifier: MIT

//! General power-of-two base conversion.
//!
//! Bech32 carries 8-bit payloads as a stream of 5-bit groups. [`convert_bits`] regroups a bit
//! stream from one width to another, most significant bit first, optionally zero-padding the last
//! group.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::fmt;

/// The number of 5-bit groups needed to carry `bytes` bytes, padded.
#[inline]
pub const fn bytes_len_to_fes_len(bytes: usize) -> usize { (bytes * 8 + 4) / 5 }

/// Mask bounding the accumulator to `from + to - 1` bits.
///
/// This is the widest the unconsumed bits can ever get: at most `to - 1` bits are left over
/// after draining, and then `from` new bits are shifted in.
#[inline]
const fn accumulator_mask(from: u32, to: u32) -> u32 { (1 << (from + to - 1)) - 1 }

/// Converts between bit sizes.
///
/// Regroups the bit stream formed by `data`, where each element holds `from` bits, into elements
/// holding `to` bits each.
///
/// With `pad == true` any leftover bits are zero-filled into one final element. With
/// `pad == false` leftover bits are only tolerated if there are fewer than `from` of them and they
/// are all zero, i.e. they are the canonical padding produced by a padded conversion in the other
/// direction.
///
/// # Errors
///
/// * [`Error::InvalidDigit`] if any element of `data` is negative or does not fit in `from` bits.
/// * [`Error::InvalidPadding`] if `pad == false` and the leftover bits are not canonical padding.
///
/// # Panics
///
/// If `from` or `to` is 0 or larger than 8.
///
/// # Examples
///
/// ```
/// use bech32_address::convert_bits;
///
/// let base5 = convert_bits(&[0xffu8], 8, 5, true).expect("bytes always fit 8 bits");
/// assert_eq!(base5, vec![0x1f, 0x1c]);
///
/// let base256 = convert_bits(&base5, 5, 8, false).expect("canonical padding");
/// assert_eq!(base256, vec![0xff]);
/// ```
pub fn convert_bits<T>(data: &[T], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Error>
where
    T: Into<i64> + Copy,
{
    if from > 8 || to > 8 || from == 0 || to == 0 {
        panic!("convert_bits `from` and `to` parameters 0 or greater than 8");
    }

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut ret: Vec<u8> =
        Vec::with_capacity((data.len() * from as usize + to as usize - 1) / to as usize);
    let maxv: u32 = (1 << to) - 1;
    let max_acc = accumulator_mask(from, to);

    for value in data {
        let v: i64 = (*value).into();
        if v < 0 || (v >> from) != 0 {
            return Err(Error::InvalidDigit(v));
        }
        // Range checked above, `v` fits in `from` <= 8 bits.
        acc = ((acc << from) | v as u32) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            ret.push(((acc >> bits) & maxv) as u8);
        }
    }

    if pad {
        if bits > 0 {
            ret.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & maxv) != 0 {
        tracing::trace!(leftover_bits = bits, "non-canonical padding");
        return Err(Error::InvalidPadding);
    }

    tracing::trace!(input = data.len(), from, to, pad, output = ret.len(), "converted bits");
    Ok(ret)
}

/// Errors returned by [`convert_bits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An input value is negative or does not fit in the source bit width.
    InvalidDigit(i64),
    /// The bit conversion failed due to a padding issue.
    InvalidPadding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            InvalidDigit(v) => write!(f, "invalid digit ({}) for the source bit width", v),
            InvalidPadding => write!(f, "invalid padding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            InvalidDigit(_) | InvalidPadding => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_conversion() {
        // Set of [data, from_bits, to_bits, pad, result]
        let tests: Vec<(Vec<u8>, u32, u32, bool, Vec<u8>)> = vec![
            (vec![0x01], 1, 1, true, vec![0x01]),
            (vec![0x01, 0x01], 1, 1, true, vec![0x01, 0x01]),
            (vec![0x01], 8, 8, true, vec![0x01]),
            (vec![0x01], 8, 4, true, vec![0x00, 0x01]),
            (vec![0x01], 8, 2, true, vec![0x00, 0x00, 0x00, 0x01]),
            (vec![0x01], 8, 1, true, vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]),
            (vec![0xff], 8, 5, true, vec![0x1f, 0x1c]),
            (vec![0x1f, 0x1c], 5, 8, false, vec![0xff]),
            (vec![], 8, 5, true, vec![]),
            (vec![], 5, 8, false, vec![]),
        ];
        for (data, from_bits, to_bits, pad, expected) in tests {
            let result = convert_bits(&data, from_bits, to_bits, pad);
            assert_eq!(result, Ok(expected), "from {} to {} pad {}", from_bits, to_bits, pad);
        }
    }

    #[test]
    fn invalid_conversion() {
        // Set of [data, from_bits, to_bits, pad, expected error]
        let tests: Vec<(Vec<u8>, u32, u32, bool, Error)> = vec![
            (vec![0xff], 8, 5, false, Error::InvalidPadding),
            (vec![0x02], 1, 1, true, Error::InvalidDigit(0x02)),
            (vec![0x1f, 0x20], 5, 8, true, Error::InvalidDigit(0x20)),
            // A lone group carries 5 bits, too many to be padding.
            (vec![0x00], 5, 8, false, Error::InvalidPadding),
            (vec![0x00; 9], 5, 8, false, Error::InvalidPadding),
            // 0x1f 0x1f leaves two leftover bits that are set.
            (vec![0x1f, 0x1f], 5, 8, false, Error::InvalidPadding),
        ];
        for (data, from_bits, to_bits, pad, expected) in tests {
            let result = convert_bits(&data, from_bits, to_bits, pad);
            assert_eq!(result, Err(expected));
        }
    }

    #[test]
    fn negative_input_is_invalid_digit() {
        assert_eq!(convert_bits(&[3i32, -1], 5, 8, true), Err(Error::InvalidDigit(-1)));
        assert_eq!(convert_bits(&[-128i8], 8, 5, true), Err(Error::InvalidDigit(-128)));
    }

    #[test]
    fn wide_input_types() {
        assert_eq!(convert_bits(&[0x1fu16, 0x1c], 5, 8, false), Ok(vec![0xff]));
        assert_eq!(convert_bits(&[256u32], 8, 5, true), Err(Error::InvalidDigit(256)));
    }

    #[test]
    fn convert_bits_invalid_bit_size() {
        use std::panic::{catch_unwind, set_hook, take_hook};

        let invalid = &[(0, 8), (5, 0), (9, 5), (8, 10), (0, 16)];

        for &(from, to) in invalid {
            set_hook(Box::new(|_| {}));
            let result = catch_unwind(|| {
                let _ = convert_bits(&[0u8], from, to, true);
            });
            let _ = take_hook();
            assert!(result.is_err());
        }
    }

    #[test]
    fn accumulator_stays_bounded() {
        assert_eq!(accumulator_mask(8, 5), 0xfff);
        assert_eq!(accumulator_mask(5, 8), 0xfff);
        assert_eq!(accumulator_mask(1, 1), 0x1);
        assert_eq!(accumulator_mask(8, 8), 0x7fff);
    }

    #[test]
    fn output_groups_fit_target_width() {
        let data: Vec<u8> = (0..=255).collect();
        for to in 1..=8 {
            let out = convert_bits(&data, 8, to, true).expect("bytes always convert");
            assert!(out.iter().all(|&v| u32::from(v) >> to == 0));
        }
    }

    #[test]
    fn padded_group_count() {
        for len in 0..64 {
            let data = vec![0xa5u8; len];
            let out = convert_bits(&data, 8, 5, true).expect("bytes always convert");
            assert_eq!(out.len(), bytes_len_to_fes_len(len));
        }
    }

    #[test]
    fn roundtrip_bytes_through_five_bit_groups() {
        let mut state: u32 = 0x1234_5678;
        for len in 0..80 {
            let data: Vec<u8> = (0..len)
                .map(|_| {
                    // xorshift32
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state as u8
                })
                .collect();
            let groups = convert_bits(&data, 8, 5, true).expect("bytes always convert");
            assert_eq!(convert_bits(&groups, 5, 8, false), Ok(data));
        }
    }
}
