//! Encode tables for the built-in alphabets and their decode-side inversions.

pub(crate) const INVALID_VALUE: u8 = 255;

pub(crate) const STD_ENCODE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

pub(crate) const URL_SAFE_ENCODE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub(crate) static STD_DECODE: [u8; 256] = invert(STD_ENCODE);

pub(crate) static URL_SAFE_DECODE: [u8; 256] = invert(URL_SAFE_ENCODE);

// Invert an encode table. Bytes outside the alphabet map to INVALID_VALUE.
const fn invert(encode: &[u8; 64]) -> [u8; 256] {
    let mut table = [INVALID_VALUE; 256];
    let mut i = 0;
    while i < 64 {
        table[encode[i] as usize] = i as u8;
        i += 1;
    }
    table
}
