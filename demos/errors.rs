//! Demonstrate output from the various crate errors.

#[cfg(not(feature = "std"))]
use core::fmt;
#[cfg(feature = "std")]
use std::error::Error;

use bech32_address::segwit::{EncodeError, KnownHrp, WitnessVersion};
use bech32_address::Fe32;

fn main() {
    crate_encode();
    crate_segwit_encode();

    primitives_convert();
    primitives_gf32();
    primitives_hrp();
}

/// Demonstrates `bech32_address::encode` errors.
fn crate_encode() {
    use bech32_address::encode;
    let function = "bech32_address::encode";

    // The arguments to pass to `function`.
    let too_long = [0x00; 64];
    let args: [(&str, &[u8]); 4] = [("", &[]), ("b c", &[]), ("bC", &[]), ("bc", &too_long)];

    for (hrp, payload) in args {
        let err = encode(hrp, payload, Some(Fe32::Q)).unwrap_err();
        println!("\n\n* Call `{}(\"{}\", [{} bytes])` -> {:?}", function, hrp, payload.len(), err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates `bech32_address::segwit::encode` errors.
fn crate_segwit_encode() {
    use bech32_address::segwit::encode;
    let function = "bech32_address::segwit::encode";

    let hrp = KnownHrp::Bitcoin;

    let invalid_witness_program_too_short = [0x00];
    let invalid_witness_program_too_long = [0x00; 50];
    let invalid_witness_program_segwit_v0 = [0x00; 16];
    let valid_witness_program_taproot = [0x00; 32];

    let print = |version: WitnessVersion, len: usize, err: EncodeError| {
        println!("\n\n* Call `{}({:?}, {}, [{} bytes])` -> {:?}", function, hrp, version, len, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    };

    let err = encode(hrp, WitnessVersion::V0, &invalid_witness_program_too_short).unwrap_err();
    print(WitnessVersion::V0, invalid_witness_program_too_short.len(), err);

    let err = encode(hrp, WitnessVersion::V0, &invalid_witness_program_too_long).unwrap_err();
    print(WitnessVersion::V0, invalid_witness_program_too_long.len(), err);

    let err = encode(hrp, WitnessVersion::V0, &invalid_witness_program_segwit_v0).unwrap_err();
    print(WitnessVersion::V0, invalid_witness_program_segwit_v0.len(), err);

    // Needs bech32m.
    let err = encode(hrp, WitnessVersion::V1, &valid_witness_program_taproot).unwrap_err();
    print(WitnessVersion::V1, valid_witness_program_taproot.len(), err);

    let err = WitnessVersion::try_from(17_u8).unwrap_err();
    println!("\n\n* Call `WitnessVersion::try_from(17)` -> {:?}", err);
    println!("\n------------");
    print_source(&err);
    println!("------------");
}

/// Demonstrates `bech32_address::convert_bits` errors.
fn primitives_convert() {
    use bech32_address::convert_bits;
    let function = "bech32_address::convert_bits";

    // 8 to 5 bits always succeeds, these go the other way without padding.
    let args: [&[u8]; 3] = [&[0x20], &[0x00, 0x01], &[0x00; 3]];

    for data in args {
        let err = convert_bits(data, 5, 8, false).unwrap_err();
        println!("\n\n* Call `{}({:?}, 5, 8, false)` -> {:?}", function, data, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates `Fe32::try_from` errors.
fn primitives_gf32() {
    let err = Fe32::try_from(32_u8).unwrap_err();
    println!("\n\n* Call `Fe32::try_from(32)` -> {:?}", err);
    println!("\n------------");
    print_source(&err);
    println!("------------");
}

/// Demonstrates the `hrp::Error` variants.
fn primitives_hrp() {
    use bech32_address::primitives::hrp::Error::*;

    println!("\n\n* All errors when parsing an invalid HRP");
    let errs = vec![TooLong(99), Empty, InvalidAsciiByte(200), MixedCase];
    println!("\n------------");

    let last = errs.len() - 1;
    for (i, e) in errs.iter().enumerate() {
        println!("Debug: {:?}\nError: {}", e.clone(), e);
        if i != last {
            println!();
        }
    }
    println!("------------");
}

/// Prints `e` in a similar fashion to the output created by `anyhow`.
#[cfg(feature = "std")]
fn print_source(mut e: &dyn Error) {
    println!("Error: {}", e);

    let mut counter = 0;
    if e.source().is_some() {
        println!("\nCaused by: ");
    }
    while let Some(inner) = e.source() {
        println!("\t{}: {}", counter, inner);
        e = inner;
        counter += 1;
    }
}

#[cfg(not(feature = "std"))]
fn print_source(e: &dyn fmt::Display) { println!("{}", e) }
