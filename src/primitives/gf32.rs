// SPDX-License-Identifier: MIT

//! A 5-bit group, the unit of data in a bech32 string.
//!
//! Every character of the data part of a bech32 string represents one value in the range `0..32`.
//! The [`Fe32`] type maintains that range as an invariant, so a sequence of `Fe32`s can always be
//! mapped through [`CHARSET`] without bounds checks failing and can always be fed to the checksum
//! engine without corrupting its arithmetic.

use core::convert::TryFrom;
use core::fmt;

/// Encoding character set. Maps data value -> char.
pub const CHARSET: [char; 32] = [
    'q', 'p', 'z', 'r', 'y', '9', 'x', '8', //  +0
    'g', 'f', '2', 't', 'v', 'd', 'w', '0', //  +8
    's', '3', 'j', 'n', '5', '4', 'k', 'h', // +16
    'c', 'e', '6', 'm', 'u', 'a', '7', 'l', // +24
];

/// An integer in the range `0..32`, i.e. one base-32 group of a bech32 data part.
// Maintains the invariant that inner is never greater than 31.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fe32(pub(crate) u8);

impl Fe32 {
    /// The value 0, encoded as `q`.
    ///
    /// Also the segwit version 0 marker.
    pub const Q: Fe32 = Fe32(0);
    /// The value 1, encoded as `p`.
    pub const P: Fe32 = Fe32(1);
    /// The value 2, encoded as `z`.
    pub const Z: Fe32 = Fe32(2);
    /// The value 16, encoded as `s`.
    pub const S: Fe32 = Fe32(16);
    /// The value 31, encoded as `l`.
    pub const L: Fe32 = Fe32(31);

    /// The largest value that can be represented.
    pub const MAX: Fe32 = Fe32::L;

    /// The size of this integer type in bits.
    pub const BITS: u32 = 5;

    /// Constructs a group from the low 5 bits of `value`, discarding the rest.
    ///
    /// # Examples
    /// ```
    /// # use bech32_address::Fe32;
    /// assert_eq!(Fe32::from_low_5_bits(33), Fe32::P);
    /// ```
    #[inline]
    pub const fn from_low_5_bits(value: u8) -> Self { Fe32(value & 0x1f) }

    /// Returns the underlying value.
    #[inline]
    pub const fn to_u8(self) -> u8 { self.0 }

    /// Returns the character this group is encoded as.
    ///
    /// # Examples
    /// ```
    /// # use bech32_address::Fe32;
    /// assert_eq!(Fe32::Q.to_char(), 'q');
    /// assert_eq!(Fe32::L.to_char(), 'l');
    /// ```
    #[inline]
    pub fn to_char(self) -> char {
        // Indexing is fine as we have self.0 in [0, 32) as an invariant.
        CHARSET[usize::from(self.0)]
    }
}

impl fmt::Debug for Fe32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fe32({}, '{}')", self.0, self.to_char())
    }
}

impl fmt::Display for Fe32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.to_char(), f) }
}

impl From<Fe32> for u8 {
    #[inline]
    fn from(v: Fe32) -> u8 { v.0 }
}

impl TryFrom<u8> for Fe32 {
    type Error = TryFromError;

    /// Tries to create an [`Fe32`] type from a `u8` value.
    ///
    /// # Errors
    ///
    /// If `value` is greater than 31.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 31 {
            Err(TryFromError::PosOverflow(value))
        } else {
            Ok(Fe32(value))
        }
    }
}

/// Error return when `TryFrom<u8>` fails for `u8` -> `Fe32` conversion.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum TryFromError {
    /// Attempted to convert a value which overflows a `Fe32`.
    PosOverflow(u8),
}

impl fmt::Display for TryFromError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TryFromError::*;

        match *self {
            PosOverflow(v) => write!(f, "value {} does not fit in 5 bits", v),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TryFromError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use TryFromError::*;

        match *self {
            PosOverflow(_) => None,
        }
    }
}
