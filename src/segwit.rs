// Written by the rust-bitcoin developers.
// SPDX-License-Identifier: MIT

//! Encoding of addresses for segregated witness outputs.
//!
//! A segwit address is a restricted form of bech32 defined in [BIP-173]: the human-readable part
//! names the network, the first data group is the witness version and the remaining groups carry
//! the witness program.
//!
//! Only version 0 outputs (P2WPKH and P2WSH) can be encoded. [BIP-350] moved witness versions 1
//! and above to the bech32m checksum, which this crate does not produce, so [`encode`] refuses
//! them rather than emit addresses that wallets reject. A raw BIP-173 string with any version
//! group is still available from [`crate::encode`].
//!
//! # Examples
//!
//! ```
//! use bech32_address::segwit::{self, KnownHrp, WitnessVersion};
//!
//! let program = [
//!     0x75, 0x1e, 0x76, 0xe8, 0x19, 0x91, 0x96, 0xd4, 0x54, 0x94,
//!     0x1c, 0x45, 0xd1, 0xb3, 0xa3, 0x23, 0xf1, 0x43, 0x3b, 0xd6,
//! ];
//! let addr = segwit::encode(KnownHrp::Bitcoin, WitnessVersion::V0, &program).expect("valid program");
//! assert_eq!(addr, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
//! ```
//!
//! [BIP-173]: <https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki>
//! [BIP-350]: <https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki>

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
use core::convert::TryFrom;
use core::fmt;

pub use crate::primitives::hrp::KnownHrp;
use crate::primitives::convert::bytes_len_to_fes_len;
use crate::primitives::gf32::Fe32;
use crate::primitives::hrp::Hrp;
use crate::ToBase32;

/// The minimum length of a witness program, in bytes.
pub const MIN_PROGRAM_LEN: usize = 2;

/// The maximum length of a witness program, in bytes.
pub const MAX_PROGRAM_LEN: usize = 40;

/// Version of a witness program, the first data group of a segwit address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum WitnessVersion {
    /// Initial version of witness program, used for P2WPKH and P2WSH outputs.
    V0 = 0,
    /// Version of witness program used for taproot P2TR outputs.
    V1 = 1,
    /// Future (unsupported) version of witness program.
    V2 = 2,
    /// Future (unsupported) version of witness program.
    V3 = 3,
    /// Future (unsupported) version of witness program.
    V4 = 4,
    /// Future (unsupported) version of witness program.
    V5 = 5,
    /// Future (unsupported) version of witness program.
    V6 = 6,
    /// Future (unsupported) version of witness program.
    V7 = 7,
    /// Future (unsupported) version of witness program.
    V8 = 8,
    /// Future (unsupported) version of witness program.
    V9 = 9,
    /// Future (unsupported) version of witness program.
    V10 = 10,
    /// Future (unsupported) version of witness program.
    V11 = 11,
    /// Future (unsupported) version of witness program.
    V12 = 12,
    /// Future (unsupported) version of witness program.
    V13 = 13,
    /// Future (unsupported) version of witness program.
    V14 = 14,
    /// Future (unsupported) version of witness program.
    V15 = 15,
    /// Future (unsupported) version of witness program.
    V16 = 16,
}

impl WitnessVersion {
    /// Returns the version as a number.
    #[inline]
    pub fn to_num(self) -> u8 { self as u8 }

    /// Returns the data group that encodes this version.
    #[inline]
    pub fn to_fe(self) -> Fe32 { Fe32::from_low_5_bits(self.to_num()) }
}

impl fmt::Display for WitnessVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.to_num(), f) }
}

impl TryFrom<u8> for WitnessVersion {
    type Error = InvalidWitnessVersionError;

    fn try_from(no: u8) -> Result<Self, Self::Error> {
        use WitnessVersion::*;

        Ok(match no {
            0 => V0,
            1 => V1,
            2 => V2,
            3 => V3,
            4 => V4,
            5 => V5,
            6 => V6,
            7 => V7,
            8 => V8,
            9 => V9,
            10 => V10,
            11 => V11,
            12 => V12,
            13 => V13,
            14 => V14,
            15 => V15,
            16 => V16,
            invalid => return Err(InvalidWitnessVersionError(invalid)),
        })
    }
}

impl TryFrom<Fe32> for WitnessVersion {
    type Error = InvalidWitnessVersionError;

    fn try_from(fe: Fe32) -> Result<Self, Self::Error> { Self::try_from(fe.to_u8()) }
}

impl From<WitnessVersion> for Fe32 {
    fn from(version: WitnessVersion) -> Self { version.to_fe() }
}

/// Returns true if `length` represents a valid witness program length for `witness_version`.
pub fn is_valid_witness_program_length(length: usize, witness_version: WitnessVersion) -> bool {
    validate_witness_program_length(length, witness_version).is_ok()
}

/// Validates the segwit witness program `length` rules for witness `version`.
///
/// Any program must be 2 to 40 bytes long, a version 0 program must be 20 bytes (P2WPKH) or
/// 32 bytes (P2WSH) long.
///
/// ref: [BIP-141](https://github.com/bitcoin/bips/blob/master/bip-0141.mediawiki#user-content-Witness_program)
pub fn validate_witness_program_length(
    length: usize,
    version: WitnessVersion,
) -> Result<(), WitnessLengthError> {
    use WitnessLengthError::*;

    if length < MIN_PROGRAM_LEN {
        return Err(TooShort);
    }
    if length > MAX_PROGRAM_LEN {
        return Err(TooLong);
    }
    if version == WitnessVersion::V0 && length != 20 && length != 32 {
        return Err(InvalidSegwitV0);
    }
    Ok(())
}

/// Encodes a segwit address using the bech32 checksum.
///
/// Encodes using lowercase characters as specified in BIP-173.
///
/// # Errors
///
/// * [`EncodeError::UnsupportedVersion`] for any version other than [`WitnessVersion::V0`].
/// * [`EncodeError::WitnessLength`] if the length of `program` is invalid for the version.
pub fn encode(
    hrp: KnownHrp,
    witness_version: WitnessVersion,
    program: &[u8],
) -> Result<String, EncodeError> {
    if witness_version != WitnessVersion::V0 {
        return Err(EncodeError::UnsupportedVersion(witness_version));
    }
    validate_witness_program_length(program.len(), witness_version)?;

    let hrp = Hrp::from(hrp);
    let mut groups = Vec::with_capacity(1 + bytes_len_to_fes_len(program.len()));
    groups.push(witness_version.to_fe());
    program.write_base32(&mut groups);

    // At most "bcrt" + "1" + 1 + 52 + 6 = 64 characters, always within the length limit.
    Ok(crate::encode_checked(&hrp, &groups))
}

/// Encodes a segwit version 0 address, for a 20 byte P2WPKH or a 32 byte P2WSH program.
///
/// # Errors
///
/// If `program` is neither 20 nor 32 bytes long.
#[inline]
pub fn encode_v0(hrp: KnownHrp, program: &[u8]) -> Result<String, EncodeError> {
    encode(hrp, WitnessVersion::V0, program)
}

/// An error while encoding a segwit address.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// The version needs the bech32m checksum, which is not supported.
    UnsupportedVersion(WitnessVersion),
    /// Invalid witness program length.
    WitnessLength(WitnessLengthError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use EncodeError::*;

        match *self {
            UnsupportedVersion(v) =>
                write!(f, "witness version {} requires bech32m, only version 0 is supported", v),
            WitnessLength(ref e) => write!(f, "invalid witness program: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use EncodeError::*;

        match *self {
            UnsupportedVersion(_) => None,
            WitnessLength(ref e) => Some(e),
        }
    }
}

impl From<WitnessLengthError> for EncodeError {
    fn from(e: WitnessLengthError) -> Self { EncodeError::WitnessLength(e) }
}

/// Number does not represent a valid witness version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWitnessVersionError(u8);

impl InvalidWitnessVersionError {
    /// Returns the rejected version number.
    pub fn invalid_version(&self) -> u8 { self.0 }
}

impl fmt::Display for InvalidWitnessVersionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid witness version {}, must be in the range 0 to 16", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidWitnessVersionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { None }
}

/// Witness program invalid because of incorrect length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum WitnessLengthError {
    /// The witness data is too short.
    TooShort,
    /// The witness data is too long.
    TooLong,
    /// The segwit v0 witness is not 20 or 32 bytes long.
    InvalidSegwitV0,
}

impl fmt::Display for WitnessLengthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use WitnessLengthError::*;

        match *self {
            TooShort => write!(f, "witness program is less than 2 bytes long"),
            TooLong => write!(f, "witness program is more than 40 bytes long"),
            InvalidSegwitV0 => write!(f, "the segwit v0 witness is not 20 or 32 bytes long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WitnessLengthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use WitnessLengthError::*;

        match *self {
            TooShort | TooLong | InvalidSegwitV0 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn witness_version_numbers() {
        for no in 0..=16_u8 {
            let version = WitnessVersion::try_from(no).expect("in range");
            assert_eq!(version.to_num(), no);
            assert_eq!(version.to_fe().to_u8(), no);
            assert_eq!(WitnessVersion::try_from(version.to_fe()), Ok(version));
        }
        assert_eq!(WitnessVersion::try_from(17).unwrap_err().invalid_version(), 17);
        assert!(WitnessVersion::try_from(Fe32::L).is_err());
        assert_eq!(WitnessVersion::V0.to_fe(), Fe32::Q);
        assert_eq!(WitnessVersion::V1.to_fe(), Fe32::P);
        assert_eq!(WitnessVersion::V16.to_string(), "16");
    }

    #[test]
    fn program_length_rules() {
        use WitnessLengthError::*;

        assert_eq!(validate_witness_program_length(1, WitnessVersion::V1), Err(TooShort));
        assert_eq!(validate_witness_program_length(41, WitnessVersion::V1), Err(TooLong));
        assert_eq!(validate_witness_program_length(2, WitnessVersion::V1), Ok(()));
        assert_eq!(validate_witness_program_length(40, WitnessVersion::V16), Ok(()));
        assert_eq!(validate_witness_program_length(21, WitnessVersion::V0), Err(InvalidSegwitV0));
        assert!(is_valid_witness_program_length(20, WitnessVersion::V0));
        assert!(is_valid_witness_program_length(32, WitnessVersion::V0));
        assert!(!is_valid_witness_program_length(0, WitnessVersion::V0));
    }

    #[test]
    fn p2wpkh() {
        let program = hex!("751e76e8199196d454941c45d1b3a323f1433bd6");
        assert_eq!(
            encode_v0(KnownHrp::Bitcoin, &program),
            Ok("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".to_string())
        );
    }

    #[test]
    fn p2wsh_testnet() {
        let program = hex!("1863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262");
        assert_eq!(
            encode_v0(KnownHrp::Testnet, &program),
            Ok("tb1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3q0sl5k7".to_string())
        );
    }

    #[test]
    fn invalid_program_length() {
        let err = encode_v0(KnownHrp::Bitcoin, &[0x00; 21]).unwrap_err();
        assert_eq!(err, EncodeError::WitnessLength(WitnessLengthError::InvalidSegwitV0));
        assert_eq!(
            encode(KnownHrp::Regtest, WitnessVersion::V0, &[0x00; 41]),
            Err(EncodeError::WitnessLength(WitnessLengthError::TooLong))
        );
    }

    #[test]
    fn versions_above_zero_are_refused() {
        for no in 1..=16_u8 {
            let version = WitnessVersion::try_from(no).expect("in range");
            // A taproot-sized program, valid for every version.
            assert_eq!(
                encode(KnownHrp::Bitcoin, version, &[0x79; 32]),
                Err(EncodeError::UnsupportedVersion(version))
            );
        }
        // Checked before the program length.
        assert_eq!(
            encode(KnownHrp::Regtest, WitnessVersion::V16, &[0xff; MAX_PROGRAM_LEN + 1]),
            Err(EncodeError::UnsupportedVersion(WitnessVersion::V16))
        );
    }

    #[test]
    fn raw_encoder_still_takes_any_version() {
        let addr = crate::encode("bc", &[0x79; 32], Some(WitnessVersion::V1.to_fe()))
            .expect("valid string");
        assert!(addr.starts_with("bc1p"));
    }

    #[test]
    fn longest_address_fits() {
        let addr = encode_v0(KnownHrp::Regtest, &[0xff; 32]).expect("valid program");
        assert!(addr.starts_with("bcrt1q"));
        assert_eq!(addr.len(), crate::encoded_length(4, 32, true));
        assert!(addr.len() <= crate::MAX_LENGTH);
    }

    #[test]
    #[cfg(feature = "std")]
    fn unsupported_version_display() {
        assert_eq!(
            EncodeError::UnsupportedVersion(WitnessVersion::V1).to_string(),
            "witness version 1 requires bech32m, only version 0 is supported"
        );
    }
}
