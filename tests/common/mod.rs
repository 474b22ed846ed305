use std::fmt;

use bech32_address::{Fe32, CHARSET};

/// Asserts two iterators are equal.
pub fn check_iter_eq<I, J, T>(mut i: I, mut j: J)
where
    I: Iterator<Item = T>,
    J: Iterator<Item = T>,
    T: PartialEq + fmt::Debug,
{
    loop {
        match (i.next(), j.next()) {
            (Some(x), Some(y)) => assert_eq!(x, y),
            (None, Some(y)) => panic!("second iterator yielded {:?}, first iterator empty", y),
            (Some(x), None) => panic!("first iterator yielded {:?}, second iterator empty", x),
            (None, None) => return,
        }
    }
}

/// Maps a string of bech32 characters to field elements, panics on characters outside [`CHARSET`].
pub fn fes(s: &str) -> Vec<Fe32> {
    s.chars()
        .map(|c| {
            let pos = CHARSET.iter().position(|&x| x == c).expect("bech32 character");
            Fe32::from_low_5_bits(pos as u8)
        })
        .collect()
}
