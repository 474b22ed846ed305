// SPDX-License-Identifier: MIT

//! The bech32 checksum, a degree-6 [BCH] code over GF(32).
//!
//! The checksum is the remainder of the message polynomial, made of the expanded human-readable
//! part followed by the data groups, modulo a fixed generator. The remainder is packed five bits
//! per coefficient into a `u32` "residue". A string carries a valid checksum iff its residue equals
//! [`TARGET_RESIDUE`].
//!
//! [`polymod`], [`create_checksum`] and [`verify_checksum`] operate on whole slices. [`Engine`] does
//! the same computation incrementally, so a checksum can be produced without concatenating the
//! expanded HRP, the data and the checksum placeholder into one buffer.
//!
//! [BCH]: <https://en.wikipedia.org/wiki/BCH_code>

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::{self, Hrp};

/// The number of groups in a bech32 checksum.
pub const CHECKSUM_LENGTH: usize = 6;

/// Generator coefficients, copied from BIP-173.
///
/// `GEN[i]` is the generator polynomial multiplied by `2^i`, reduced, packed five bits per
/// coefficient.
pub const GEN: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// The residue a valid bech32 string leaves, `1` for bech32 (BIP-173).
pub const TARGET_RESIDUE: u32 = 1;

/// Masks the residue down to the 25 bits that survive a multiplication by `x`.
const RESIDUE_LOW_MASK: u32 = 0x1ff_ffff;

/// A checksum engine, which can be used to compute or verify a checksum.
///
/// Feed it the data to be checksummed using the `Self::input_*` methods.
///
/// # Examples
///
/// ```
/// use bech32_address::primitives::checksum::{self, Engine};
/// use bech32_address::primitives::hrp::Hrp;
/// use bech32_address::Fe32;
///
/// let hrp = Hrp::parse("bc").expect("valid hrp");
/// let data = [Fe32::Q, Fe32::P, Fe32::Z];
///
/// let mut engine = Engine::new();
/// engine.input_hrp(&hrp);
/// data.iter().for_each(|fe| engine.input_fe(*fe));
/// engine.input_target_residue();
///
/// assert_eq!(engine.checksum(), checksum::create_checksum(b"bc", &data));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Engine {
    residue: u32,
}

impl Default for Engine {
    fn default() -> Self { Self::new() }
}

impl Engine {
    /// Constructs a new checksum engine with no data input.
    #[inline]
    pub fn new() -> Self { Engine { residue: 1 } }

    /// Feeds `hrp` into the checksum engine, as lowercase.
    #[inline]
    pub fn input_hrp(&mut self, hrp: &Hrp) {
        for fe in HrpFe32Iter::from_hrp(hrp) {
            self.input_fe(fe)
        }
    }

    /// Feeds the expansion of raw `hrp` bytes into the checksum engine, without any case folding.
    #[inline]
    pub fn input_hrp_bytes(&mut self, hrp: &[u8]) {
        for fe in HrpFe32Iter::new(hrp.iter().copied()) {
            self.input_fe(fe)
        }
    }

    /// Adds a single group to the checksum engine.
    ///
    /// Multiplies the residue by `x`, adds `e` as the new constant coefficient and reduces by the
    /// generator using the coefficient that was shifted out.
    #[inline]
    pub fn input_fe(&mut self, e: Fe32) {
        let top = self.residue >> 25;
        self.residue = (self.residue & RESIDUE_LOW_MASK) << 5 ^ u32::from(e.to_u8());
        for (i, gen) in GEN.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                self.residue ^= gen;
            }
        }
    }

    /// Inputs the six zero groups that stand in for the checksum while it is being computed.
    #[inline]
    pub fn input_target_residue(&mut self) {
        for _ in 0..CHECKSUM_LENGTH {
            self.input_fe(Fe32::Q);
        }
    }

    /// Returns the current checksum residue.
    #[inline]
    pub fn residue(&self) -> u32 { self.residue }

    /// Returns the checksum groups for the data input so far.
    ///
    /// Only meaningful once [`Engine::input_target_residue`] has been called.
    #[inline]
    pub fn checksum(&self) -> [Fe32; CHECKSUM_LENGTH] { unpack(self.residue ^ TARGET_RESIDUE) }
}

/// Splits a 30-bit checksum into six groups, most significant first.
fn unpack(plm: u32) -> [Fe32; CHECKSUM_LENGTH] {
    let mut checksum = [Fe32::Q; CHECKSUM_LENGTH];
    for (i, fe) in checksum.iter_mut().enumerate() {
        *fe = Fe32::from_low_5_bits((plm >> (5 * (5 - i))) as u8);
    }
    checksum
}

/// Expands `hrp` for checksumming.
///
/// Produces the high 3 bits of every character, then a single `0`, then the low 5 bits of every
/// character. `hrp` is used as given, callers wanting the canonical checksum must lowercase it
/// first.
///
/// # Examples
///
/// ```
/// use bech32_address::primitives::checksum::hrp_expand;
///
/// let expanded: Vec<u8> = hrp_expand(b"bc").into_iter().map(u8::from).collect();
/// assert_eq!(expanded, vec![3, 3, 0, 2, 3]);
/// ```
pub fn hrp_expand(hrp: &[u8]) -> Vec<Fe32> {
    HrpFe32Iter::new(hrp.iter().copied()).collect()
}

/// Computes the bech32 residue of `values`.
pub fn polymod(values: &[Fe32]) -> u32 {
    let mut engine = Engine::new();
    values.iter().for_each(|v| engine.input_fe(*v));
    engine.residue()
}

/// Creates the six group checksum for `data` under `hrp`.
///
/// Equivalent to `polymod(hrp_expand(hrp) ++ data ++ [0; 6]) ^ 1` split into groups.
pub fn create_checksum(hrp: &[u8], data: &[Fe32]) -> [Fe32; CHECKSUM_LENGTH] {
    let mut engine = Engine::new();
    engine.input_hrp_bytes(hrp);
    data.iter().for_each(|fe| engine.input_fe(*fe));
    engine.input_target_residue();

    let checksum = engine.checksum();
    tracing::trace!(groups = data.len(), residue = engine.residue(), "created checksum");
    checksum
}

/// Returns true if `data`, trailing checksum included, carries a valid checksum under `hrp`.
pub fn verify_checksum(hrp: &[u8], data: &[Fe32]) -> bool {
    let mut engine = Engine::new();
    engine.input_hrp_bytes(hrp);
    data.iter().for_each(|fe| engine.input_fe(*fe));
    engine.residue() == TARGET_RESIDUE
}

/// Iterator that yields the expansion of an HRP, ready to be fed to the checksum engine.
pub struct HrpFe32Iter<I>
where
    I: Iterator<Item = u8> + Clone,
{
    /// Yields the high bits of every character.
    high_iter: Option<I>,
    /// Yields the low bits of every character, after the separator.
    low_iter: Option<I>,
}

impl<I> HrpFe32Iter<I>
where
    I: Iterator<Item = u8> + Clone,
{
    /// Creates an iterator that yields the expansion of the characters yielded by `iter`.
    #[inline]
    pub fn new(iter: I) -> Self {
        let high_iter = iter.clone();
        let low_iter = iter;
        Self { high_iter: Some(high_iter), low_iter: Some(low_iter) }
    }
}

impl<I> Iterator for HrpFe32Iter<I>
where
    I: Iterator<Item = u8> + Clone,
{
    type Item = Fe32;

    #[inline]
    fn next(&mut self) -> Option<Fe32> {
        if let Some(high_iter) = self.high_iter.as_mut() {
            match high_iter.next() {
                Some(high) => return Some(Fe32::from_low_5_bits(high >> 5)),
                None => {
                    self.high_iter = None;
                    return Some(Fe32::Q);
                }
            }
        }
        if let Some(low_iter) = self.low_iter.as_mut() {
            match low_iter.next() {
                Some(low) => return Some(Fe32::from_low_5_bits(low)),
                None => self.low_iter = None,
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let high = match &self.high_iter {
            Some(iter) => {
                let (min, max) = iter.size_hint();
                (min + 1, max.map(|max| max + 1)) // +1 for the separator
            }
            None => (0, Some(0)),
        };
        let low = match &self.low_iter {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        };
        let max = match (high.1, low.1) {
            (Some(high), Some(low)) => Some(high + low),
            _ => None,
        };
        (high.0 + low.0, max)
    }
}

impl<I> FusedIterator for HrpFe32Iter<I> where I: Iterator<Item = u8> + Clone {}

impl<'s> HrpFe32Iter<hrp::LowercaseIter<'s>> {
    /// Creates an iterator over the expansion of a validated HRP, as lowercase.
    #[inline]
    pub fn from_hrp(hrp: &Hrp<'s>) -> Self { Self::new(hrp.lowercase_bytes()) }
}

#[cfg(test)]
mod tests {
    use core::convert::TryFrom;

    use super::*;

    fn fes(values: &[u8]) -> Vec<Fe32> {
        values.iter().map(|v| Fe32::try_from(*v).expect("test data is 5-bit clean")).collect()
    }

    #[test]
    fn hrp_expand_splits_characters() {
        let expanded: Vec<u8> = hrp_expand(b"bc").into_iter().map(u8::from).collect();
        // 'b' = 0x62, 'c' = 0x63
        assert_eq!(expanded, vec![3, 3, 0, 2, 3]);

        let expanded: Vec<u8> = hrp_expand(b"npub").into_iter().map(u8::from).collect();
        assert_eq!(expanded, vec![3, 3, 3, 3, 0, 14, 16, 21, 2]);

        assert_eq!(hrp_expand(b"").len(), 1);
    }

    #[test]
    fn hrp_iter_size_hint() {
        let iter = HrpFe32Iter::new(b"bcrt".iter().copied());
        assert_eq!(iter.size_hint(), (9, Some(9)));
        assert_eq!(iter.count(), 9);
    }

    #[test]
    fn hrp_iter_is_fused() {
        let mut iter = HrpFe32Iter::new(b"a".iter().copied());
        assert_eq!(iter.by_ref().count(), 3);
        for _ in 0..10 {
            assert!(iter.next().is_none());
        }
    }

    #[test]
    fn polymod_of_nothing_is_one() {
        assert_eq!(polymod(&[]), 1);
    }

    #[test]
    fn polymod_reduces_by_generators() {
        // Five groups shift the initial 1 up to the top coefficient without any reduction.
        assert_eq!(polymod(&fes(&[0; 5])), 1 << 25);
        // The sixth shifts it out, leaving exactly the first generator.
        assert_eq!(polymod(&fes(&[0; 6])), GEN[0]);
    }

    #[test]
    fn bip_173_checksum() {
        // "a12uel5l": hrp "a", empty data, checksum "2uel5l".
        let checksum = create_checksum(b"a", &[]);
        let s: String = checksum.iter().map(|fe| fe.to_char()).collect();
        assert_eq!(s, "2uel5l");
        assert!(verify_checksum(b"a", &checksum));
    }

    #[test]
    fn created_checksum_verifies() {
        let hrps: [&[u8]; 4] = [
            b"bc",
            b"tb",
            b"npub",
            b"an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio",
        ];
        for hrp in hrps.iter() {
            for len in 0..40_u8 {
                let values: Vec<u8> = (0..len).map(|i| ((u32::from(i) * 7 + 3) % 32) as u8).collect();
                let mut data = fes(&values);
                let checksum = create_checksum(hrp, &data);
                data.extend_from_slice(&checksum);
                assert!(verify_checksum(hrp, &data));
            }
        }
    }

    #[test]
    fn single_bit_flips_are_detected() {
        let hrp = b"bc".to_vec();
        let mut data = fes(&[0, 14, 20, 15, 7, 13, 26, 0, 25, 18, 6, 11, 13, 8, 21, 4, 20, 3]);
        let checksum = create_checksum(&hrp, &data);
        data.extend_from_slice(&checksum);
        assert!(verify_checksum(&hrp, &data));

        for i in 0..data.len() {
            for bit in 0..5 {
                let mut corrupted = data.clone();
                corrupted[i] = Fe32::from_low_5_bits(corrupted[i].to_u8() ^ (1 << bit));
                assert!(!verify_checksum(&hrp, &corrupted), "flip of bit {} in group {}", bit, i);
            }
        }

        for i in 0..hrp.len() {
            for bit in 0..8 {
                let mut corrupted = hrp.clone();
                corrupted[i] ^= 1 << bit;
                assert!(!verify_checksum(&corrupted, &data), "flip of bit {} in hrp byte {}", bit, i);
            }
        }
    }

    #[test]
    fn checksum_depends_on_case() {
        let data = fes(&[1, 2, 3]);
        assert_ne!(create_checksum(b"bc", &data), create_checksum(b"BC", &data));
    }

    #[test]
    fn engine_matches_slice_functions() {
        let hrp = Hrp::parse("BC").expect("valid hrp");
        let data = fes(&[16, 14, 20, 15, 0]);

        let mut engine = Engine::new();
        engine.input_hrp(&hrp);
        data.iter().for_each(|fe| engine.input_fe(*fe));
        engine.input_target_residue();

        // The engine folds the hrp to lowercase.
        assert_eq!(engine.checksum(), create_checksum(b"bc", &data));

        let mut values = hrp_expand(b"bc");
        values.extend_from_slice(&data);
        values.extend_from_slice(&[Fe32::Q; CHECKSUM_LENGTH]);
        assert_eq!(engine.residue(), polymod(&values));
    }
}
