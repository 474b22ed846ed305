// Written by Clark Moody and the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! The human-readable part (HRP) of a bech32 string, the prefix before the `1` separator.
//!
//! BIP-173 allows 1 to 83 printable US-ASCII characters (33 to 126) and forbids mixing cases.
//! The checksum is always computed over the lowercase form, so a parsed [`Hrp`] remembers its
//! case and hands out lowercase bytes on request.
//!
//! ref: [BIP-173](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki#user-content-Bech32)

use alloc::borrow::Cow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::RangeInclusive;

/// Maximum length of the human-readable part, as defined by BIP-173.
pub const MAX_HRP_LEN: usize = 83;

/// Bytes allowed in a human-readable part.
const PRINTABLE: RangeInclusive<u8> = 33..=126;

/// A validated human-readable part, borrowed from the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hrp<'s> {
    inner: &'s str,
    case: Case,
}

/// Letter case of a validated HRP. `None` means it holds no letters at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Case {
    Lower,
    Upper,
    None,
}

impl<'s> Hrp<'s> {
    /// Validates `hrp` against the BIP-173 rules.
    ///
    /// Only the syntax is checked. Whether the prefix means anything to an application (`bc`,
    /// `npub`, ...) is up to the caller.
    ///
    /// # Errors
    ///
    /// If `hrp` is empty, longer than [`MAX_HRP_LEN`], contains a byte outside of `33..=126` or
    /// mixes upper and lower case. Length is checked before content.
    ///
    /// # Examples
    ///
    /// ```
    /// use bech32_address::primitives::hrp::{Error, Hrp};
    ///
    /// assert!(Hrp::parse("bc").is_ok());
    /// assert_eq!(Hrp::parse(""), Err(Error::Empty));
    /// assert_eq!(Hrp::parse("b c"), Err(Error::InvalidAsciiByte(b' ')));
    /// assert_eq!(Hrp::parse("Bc"), Err(Error::MixedCase));
    /// ```
    pub fn parse(hrp: &'s str) -> Result<Self, Error> {
        match hrp.len() {
            0 => return Err(Error::Empty),
            len if len > MAX_HRP_LEN => return Err(Error::TooLong(len)),
            _ => {}
        }

        let mut case = Case::None;
        for b in hrp.bytes() {
            if !PRINTABLE.contains(&b) {
                return Err(Error::InvalidAsciiByte(b));
            }
            let seen = if b.is_ascii_lowercase() {
                Case::Lower
            } else if b.is_ascii_uppercase() {
                Case::Upper
            } else {
                continue;
            };
            match (case, seen) {
                (Case::None, _) => case = seen,
                (current, seen) if current != seen => return Err(Error::MixedCase),
                _ => {}
            }
        }

        Ok(Hrp { inner: hrp, case })
    }

    /// Wraps a lowercase prefix that is known to be valid, for the fixed prefixes of this crate.
    #[inline]
    pub(crate) const fn from_static_lower(hrp: &'static str) -> Hrp<'static> {
        Hrp { inner: hrp, case: Case::Lower }
    }

    /// Returns the lowercase form, borrowing unless the input was uppercase.
    pub fn to_lower(&self) -> Cow<'s, str> {
        match self.case {
            Case::Upper => Cow::Owned(self.inner.to_ascii_lowercase()),
            Case::Lower | Case::None => Cow::Borrowed(self.inner),
        }
    }

    /// Iterates over the bytes of the lowercase form.
    #[inline]
    pub fn lowercase_bytes(&self) -> LowercaseIter<'s> {
        LowercaseIter { iter: self.inner.bytes() }
    }

    /// Returns the HRP as given to [`Hrp::parse`], in its original case.
    #[inline]
    pub fn as_str(&self) -> &'s str { self.inner }

    /// Returns true if the HRP was given in uppercase.
    #[inline]
    pub fn is_uppercase(&self) -> bool { self.case == Case::Upper }

    /// Returns the number of characters, between 1 and [`MAX_HRP_LEN`].
    #[inline]
    pub fn len(&self) -> usize { self.inner.len() }

    /// Always false, a valid HRP has at least one character.
    #[inline]
    pub fn is_empty(&self) -> bool { false }
}

/// Writes the lowercase form, as it appears in an encoded string.
impl fmt::Display for Hrp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(&self.to_lower()) }
}

/// Lowercase bytes of an [`Hrp`].
#[derive(Clone, Debug)]
pub struct LowercaseIter<'s> {
    iter: core::str::Bytes<'s>,
}

impl Iterator for LowercaseIter<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> { self.iter.next().map(|b| b.to_ascii_lowercase()) }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { self.iter.size_hint() }
}

impl ExactSizeIterator for LowercaseIter<'_> {}

impl FusedIterator for LowercaseIter<'_> {}

/// Prefixes of the Bitcoin networks that use segwit addresses.
///
/// Signet shares "tb" with testnet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KnownHrp {
    /// Mainnet, "bc".
    Bitcoin,
    /// Testnet and signet, "tb".
    Testnet,
    /// Regtest, "bcrt".
    Regtest,
}

impl KnownHrp {
    /// Returns the prefix of the network.
    pub const fn as_str(self) -> &'static str {
        match self {
            KnownHrp::Bitcoin => "bc",
            KnownHrp::Testnet => "tb",
            KnownHrp::Regtest => "bcrt",
        }
    }
}

impl fmt::Display for KnownHrp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}

/// # Examples
///
/// ```
/// use bech32_address::primitives::hrp::{Hrp, KnownHrp};
///
/// assert_eq!(Hrp::from(KnownHrp::Regtest).as_str(), "bcrt");
/// ```
impl From<KnownHrp> for Hrp<'static> {
    fn from(known: KnownHrp) -> Self { Hrp::from_static_lower(known.as_str()) }
}

/// A string that is not a valid BIP-173 human-readable part.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Longer than [`MAX_HRP_LEN`], holds the actual length.
    TooLong(usize),
    /// No characters at all.
    Empty,
    /// A byte outside the printable range 33 to 126.
    InvalidAsciiByte(u8),
    /// Both upper and lower case letters.
    MixedCase,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match *self {
            TooLong(len) =>
                write!(f, "{} characters exceeds the hrp limit of {}", len, MAX_HRP_LEN),
            Empty => f.write_str("empty hrp"),
            InvalidAsciiByte(b) => write!(f, "hrp byte {:#04x} is outside the printable range", b),
            MixedCase => f.write_str("hrp mixes upper and lower case"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match *self {
            TooLong(_) | Empty | InvalidAsciiByte(_) | MixedCase => None,
        }
    }
}
