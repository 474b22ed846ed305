// SPDX-License-Identifier: MIT

//! Bech32 encoding of nostr keys and identifiers, as defined by [NIP-19].
//!
//! Nostr encodes its 32-byte public keys, secret keys and event ids as plain bech32 strings: the
//! human-readable part names the kind of entity, there is no version group, and the 32 bytes are
//! the whole payload. Every such string is 63 characters long.
//!
//! # Examples
//!
//! ```
//! use bech32_address::nostr;
//!
//! let key = [
//!     0x3b, 0xf0, 0xc6, 0x3f, 0xcb, 0x93, 0x46, 0x34, 0x07, 0xaf, 0x97, 0xa5, 0xe5, 0xee, 0x64, 0xfa,
//!     0x88, 0x3d, 0x10, 0x7e, 0xf9, 0xe5, 0x58, 0x47, 0x2c, 0x4e, 0xb9, 0xaa, 0xae, 0xfa, 0x45, 0x9d,
//! ];
//! assert_eq!(
//!     nostr::encode_public_key(&key),
//!     "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6",
//! );
//! ```
//!
//! [NIP-19]: <https://github.com/nostr-protocol/nips/blob/master/19.md>

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::primitives::convert::bytes_len_to_fes_len;
use crate::primitives::hrp::Hrp;
use crate::ToBase32;

/// The length of every nostr key and event id, in bytes.
pub const KEY_LEN: usize = 32;

/// The kinds of bare 32-byte nostr entities that have a bech32 form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Kind {
    /// A public key - "npub".
    PublicKey,
    /// A secret key - "nsec".
    SecretKey,
    /// An event id - "note".
    EventId,
}

impl Kind {
    /// Returns the human-readable part used for this kind of entity.
    pub fn hrp(self) -> Hrp<'static> {
        use Kind::*;

        match self {
            PublicKey => Hrp::from_static_lower("npub"),
            SecretKey => Hrp::from_static_lower("nsec"),
            EventId => Hrp::from_static_lower("note"),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.hrp(), f) }
}

/// Encodes a 32-byte nostr entity of the given `kind`.
///
/// The output is always 63 characters, well within the bech32 length limit, so this cannot fail.
pub fn encode(kind: Kind, bytes: &[u8; KEY_LEN]) -> String {
    let hrp = kind.hrp();
    let mut groups = Vec::with_capacity(bytes_len_to_fes_len(KEY_LEN));
    bytes.write_base32(&mut groups);

    crate::encode_checked(&hrp, &groups)
}

/// Encodes an x-only public key as an "npub" string.
#[inline]
pub fn encode_public_key(key: &[u8; KEY_LEN]) -> String { encode(Kind::PublicKey, key) }

/// Encodes a secret key as an "nsec" string.
#[inline]
pub fn encode_secret_key(key: &[u8; KEY_LEN]) -> String { encode(Kind::SecretKey, key) }

/// Encodes an event id as a "note" string.
#[inline]
pub fn encode_event_id(id: &[u8; KEY_LEN]) -> String { encode(Kind::EventId, id) }
