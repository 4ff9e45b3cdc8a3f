//! The radix-64 alphabets understood by this crate.

use crate::private::SealedAlphabet;
use crate::tables;
use crate::u6::U6;

/// Alphabet selects the 64-symbol mapping and padding policy used when
/// encoding and decoding.
///
/// This trait is sealed and only implemented by [`Std`] and [`UrlSafe`].
pub trait Alphabet: Copy + SealedAlphabet {}

macro_rules! impl_alphabet_from_table {
    ($alpha:ty, $encode_table:ident, $decode_table:ident, $padding:expr) => {
        impl SealedAlphabet for $alpha {
            #[inline]
            fn encode_u6(self, input: U6) -> u8 {
                let idx: usize = input.into();
                tables::$encode_table[idx]
            }

            #[inline]
            fn decode_u8(self, input: u8) -> u8 {
                tables::$decode_table[input as usize]
            }

            #[inline]
            fn padding_byte(self) -> Option<u8> {
                $padding
            }
        }

        impl Alphabet for $alpha {}
    };
}

/// The standard character set (uses `+` and `/`) with `=` padding.
///
/// This is the alphabet of the armor wire format. See
/// [RFC 4648](https://tools.ietf.org/html/rfc4648#section-4).
#[derive(Debug, Clone, Copy)]
pub struct Std;
impl_alphabet_from_table!(Std, STD_ENCODE, STD_DECODE, Some(b'='));

/// The URL safe character set (uses `-` and `_`) *without* padding.
///
/// See [RFC 4648](https://tools.ietf.org/html/rfc4648#section-5).
#[derive(Debug, Clone, Copy)]
pub struct UrlSafe;
impl_alphabet_from_table!(UrlSafe, URL_SAFE_ENCODE, URL_SAFE_DECODE, None);
