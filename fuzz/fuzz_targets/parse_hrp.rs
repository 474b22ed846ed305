use bech32_address::primitives::hrp::MAX_HRP_LEN;
use bech32_address::Hrp;
use honggfuzz::fuzz;

fn do_test(data: &[u8]) {
    let s = String::from_utf8_lossy(data);

    // Make sure parsing garbage doesn't make us crash (from_utf8_lossy should
    // contain some garbage, perhaps even invalid chars).
    let hrp = match Hrp::parse(&s) {
        Ok(hrp) => hrp,
        Err(_) => return,
    };

    assert!(hrp.len() <= MAX_HRP_LEN);
    assert!(hrp.to_lower().bytes().all(|b| !b.is_ascii_uppercase()));
    // An empty data part always fits, the longest is 83 + 1 + 6 = 90 characters.
    let s = bech32_address::encode(hrp.as_str(), &[], None).expect("valid hrp encodes");
    assert_eq!(&s[..hrp.len()], hrp.to_lower());
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
