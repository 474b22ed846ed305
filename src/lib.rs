// Written by Clark Moody and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Encoding byte payloads as Bech32 strings.
//!
//! Bech32 is a 5-bit (base-32) encoding scheme that produces strings that comprise a
//! human-readable part, a separator, a data part, and a checksum. The checksum is a BCH code that
//! guarantees detection of up to four character errors, with less than a 1 in 1 billion chance of
//! failing to detect more errors.
//!
//! The Bech32 encoding was originally formulated in [BIP-0173]. It is used for segwit addresses
//! (see [`segwit`]) and for nostr keys and identifiers (see [`nostr`]).
//!
//! Encoding happens in three steps, each of which is available on its own:
//!
//! 1. The payload bytes are regrouped into 5-bit groups, see [`convert_bits`].
//! 2. A checksum is computed over the human-readable part and the groups, see
//!    [`primitives::checksum`].
//! 3. The groups and the checksum are mapped through [`CHARSET`] and appended to the
//!    human-readable part and [`SEP`], see [`encode`].
//!
//! # Examples
//!
//! ```
//! use bech32_address::Fe32;
//!
//! // A segwit v0 address, the witness version is the first data group.
//! let program = [
//!     0x75, 0x1e, 0x76, 0xe8, 0x19, 0x91, 0x96, 0xd4, 0x54, 0x94,
//!     0x1c, 0x45, 0xd1, 0xb3, 0xa3, 0x23, 0xf1, 0x43, 0x3b, 0xd6,
//! ];
//! let address = bech32_address::encode("bc", &program, Some(Fe32::Q)).expect("valid hrp");
//! assert_eq!(address, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
//!
//! // A nostr public key, no version group.
//! let key = [
//!     0x3b, 0xf0, 0xc6, 0x3f, 0xcb, 0x93, 0x46, 0x34, 0x07, 0xaf, 0x97, 0xa5, 0xe5, 0xee, 0x64, 0xfa,
//!     0x88, 0x3d, 0x10, 0x7e, 0xf9, 0xe5, 0x58, 0x47, 0x2c, 0x4e, 0xb9, 0xaa, 0xae, 0xfa, 0x45, 0x9d,
//! ];
//! let npub = bech32_address::encode("npub", &key, None).expect("valid hrp");
//! assert_eq!(npub, "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6");
//! ```
//!
//! [BIP-0173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
// Experimental features we need.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// Coding conventions
#![deny(missing_docs)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

extern crate alloc;

pub mod nostr;
pub mod primitives;
pub mod segwit;

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::primitives::checksum::{self, CHECKSUM_LENGTH};
use crate::primitives::convert::bytes_len_to_fes_len;
use crate::primitives::hrp;

#[rustfmt::skip]                // Keep public re-exports separate.
#[doc(inline)]
pub use crate::{
    primitives::convert::convert_bits,
    primitives::gf32::{Fe32, CHARSET},
    primitives::hrp::Hrp,
};

/// Human-readable part and data part separator.
///
/// Never part of [`CHARSET`], so the last `1` of a string always marks the boundary.
pub const SEP: char = '1';

/// The maximum length of an encoded string, as defined by BIP-173.
pub const MAX_LENGTH: usize = 90;

/// A trait for converting a value to a sequence of 5-bit groups.
pub trait ToBase32 {
    /// Converts `self` to 5-bit groups, padding the last group with zero bits.
    fn to_base32(&self) -> Vec<Fe32> {
        let mut buf = Vec::new();
        self.write_base32(&mut buf);
        buf
    }

    /// Converts `self` to 5-bit groups and appends them to `buf`.
    fn write_base32(&self, buf: &mut Vec<Fe32>);
}

impl<T: AsRef<[u8]>> ToBase32 for T {
    fn write_base32(&self, buf: &mut Vec<Fe32>) {
        let groups = convert_bits(self.as_ref(), 8, 5, true)
            .expect("both error conditions are impossible (InvalidPadding, InvalidDigit)");
        // `convert_bits` output fits in `to` = 5 bits.
        buf.extend(groups.into_iter().map(Fe32::from_low_5_bits));
    }
}

/// Returns the length of the string [`encode`] produces, without doing any encoding.
///
/// # Examples
///
/// ```
/// use bech32_address::encoded_length;
///
/// // "bc" + "1" + version + 32 groups + 6 checksum groups.
/// assert_eq!(encoded_length(2, 20, true), 42);
/// // "npub" + "1" + 52 groups + 6 checksum groups.
/// assert_eq!(encoded_length(4, 32, false), 63);
/// ```
pub const fn encoded_length(hrp_len: usize, payload_len: usize, has_version: bool) -> usize {
    hrp_len + 1 + has_version as usize + bytes_len_to_fes_len(payload_len) + CHECKSUM_LENGTH
}

/// Encodes `payload` as a bech32 string under the human-readable part `hrp`.
///
/// If `witness_version` is given it becomes the first data group, ahead of the groups of the
/// payload, as segwit addresses require. The output is always lowercase, an uppercase `hrp` is
/// lowercased before it is checksummed.
///
/// # Errors
///
/// * [`EncodeError::InvalidHrp`] if `hrp` is not a valid BIP-173 human-readable part, e.g. empty
///   or containing characters outside of the printable US-ASCII range 33 to 126.
/// * [`EncodeError::InvalidLength`] if the encoded string would be longer than [`MAX_LENGTH`].
///
/// # Examples
///
/// ```
/// use bech32_address::{EncodeError, Fe32};
///
/// let s = bech32_address::encode("bech32", &[0x00, 0x01, 0x02], None).expect("valid hrp");
/// assert_eq!(s, "bech321qqqsyrhqy2a");
///
/// assert!(matches!(bech32_address::encode("", &[], None), Err(EncodeError::InvalidHrp(_))));
/// assert_eq!(
///     bech32_address::encode("bc", &[0; 64], Some(Fe32::Q)),
///     Err(EncodeError::InvalidLength(113)),
/// );
/// ```
pub fn encode(
    hrp: &str,
    payload: &[u8],
    witness_version: Option<Fe32>,
) -> Result<String, EncodeError> {
    let hrp = Hrp::parse(hrp)?;

    let len = encoded_length(hrp.len(), payload.len(), witness_version.is_some());
    if len > MAX_LENGTH {
        return Err(EncodeError::InvalidLength(len));
    }

    let mut groups = Vec::with_capacity(len - hrp.len() - 1);
    groups.extend(witness_version);
    payload.write_base32(&mut groups);

    Ok(encode_checked(&hrp, &groups))
}

/// Encodes 5-bit `groups` that have already been converted from bytes as a bech32 string.
///
/// Nothing is prepended to `groups`, a witness version must already be the first group.
///
/// # Errors
///
/// As for [`encode`].
///
/// # Examples
///
/// ```
/// use bech32_address::{Fe32, ToBase32};
///
/// let mut groups = vec![Fe32::Q];
/// groups.extend([0x75u8, 0x1e, 0x76, 0xe8, 0x19, 0x91, 0x96, 0xd4].to_base32());
/// let s = bech32_address::encode_groups("tb", &groups).expect("valid hrp");
/// assert!(s.starts_with("tb1q"));
/// ```
pub fn encode_groups(hrp: &str, groups: &[Fe32]) -> Result<String, EncodeError> {
    let hrp = Hrp::parse(hrp)?;

    let len = hrp.len() + 1 + groups.len() + CHECKSUM_LENGTH;
    if len > MAX_LENGTH {
        return Err(EncodeError::InvalidLength(len));
    }

    Ok(encode_checked(&hrp, groups))
}

/// Appends the checksum to `groups` and formats the string.
///
/// Callers must have validated the length.
pub(crate) fn encode_checked(hrp: &Hrp, groups: &[Fe32]) -> String {
    let lower = hrp.to_lower();
    let checksum = checksum::create_checksum(lower.as_bytes(), groups);

    let mut s = String::with_capacity(hrp.len() + 1 + groups.len() + CHECKSUM_LENGTH);
    s.push_str(&lower);
    s.push(SEP);
    s.extend(groups.iter().chain(checksum.iter()).map(|fe| fe.to_char()));

    tracing::debug!(hrp = %lower, groups = groups.len(), len = s.len(), "encoded bech32 string");
    s
}

/// An error while encoding a bech32 string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// Encountered an invalid human-readable part.
    InvalidHrp(hrp::Error),
    /// The encoded string would be longer than [`MAX_LENGTH`], holds the length it would have.
    InvalidLength(usize),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use EncodeError::*;

        match *self {
            InvalidHrp(ref e) => write!(f, "invalid human-readable part: {}", e),
            InvalidLength(len) => write!(
                f,
                "encoded string would be {} characters long, the maximum is {}",
                len, MAX_LENGTH
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use EncodeError::*;

        match *self {
            InvalidHrp(ref e) => Some(e),
            InvalidLength(_) => None,
        }
    }
}

impl From<hrp::Error> for EncodeError {
    fn from(e: hrp::Error) -> Self { Self::InvalidHrp(e) }
}
