#![no_main]
use libfuzzer_sys::fuzz_target;

// Encode random input, and ensure that decoding the result matches the input.
fuzz_target!(|data: &[u8]| {
    let armored = armor64::encode(data);
    let decoded = armor64::decode(&armored).expect("decode failed");
    assert_eq!(data, decoded.as_slice());
});
