// SPDX-License-Identifier: MIT

//! Provides the internal nuts and bolts that enable bech32 encoding.

pub mod checksum;
pub mod convert;
pub mod gf32;
pub mod hrp;
