use std::str;

use bech32_address::primitives::checksum;
use bech32_address::{convert_bits, encoded_length, EncodeError, Fe32, CHARSET, MAX_LENGTH, SEP};
use honggfuzz::fuzz;

fn do_test(data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let hrp_end = (data[0] as usize) + 1;

    if data.len() < hrp_end {
        return;
    }

    let dp = &data[hrp_end..];

    let hrp = match str::from_utf8(&data[1..hrp_end]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let address = match bech32_address::encode(hrp, dp, Some(Fe32::Q)) {
        Ok(addr) => addr,
        Err(EncodeError::InvalidLength(len)) => {
            assert!(len > MAX_LENGTH);
            assert_eq!(len, encoded_length(hrp.len(), dp.len(), true));
            return;
        }
        Err(_) => return,
    };

    assert_eq!(address.len(), encoded_length(hrp.len(), dp.len(), true));
    assert!(address.len() <= MAX_LENGTH);

    let lower = hrp.to_ascii_lowercase();
    let (prefix, rest) = address.split_at(lower.len());
    assert_eq!(prefix, lower);
    assert!(rest.starts_with(SEP));

    let groups: Vec<Fe32> = rest[1..]
        .chars()
        .map(|c| {
            let pos = CHARSET.iter().position(|&x| x == c).expect("only charset characters");
            Fe32::from_low_5_bits(pos as u8)
        })
        .collect();
    assert!(checksum::verify_checksum(lower.as_bytes(), &groups));

    // Strip the version and the checksum, what is left converts back to the payload.
    let payload_groups: Vec<u8> =
        groups[1..groups.len() - checksum::CHECKSUM_LENGTH].iter().map(|fe| fe.to_u8()).collect();
    let bytes = convert_bits(&payload_groups, 5, 8, false).expect("own padding is valid");
    assert_eq!(bytes, dp);
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
