//! Radix-64 for OpenPGP ASCII armor: streaming, line-wrapped base64.
//!
//! The armor text substrate carries binary packet data over text-only
//! channels as 60-character base64 lines. This crate is the codec for that
//! substrate: whole-value conversions, plus streaming state machines that
//! produce identical output no matter how the input is split into chunks
//! and tolerate the whitespace a transport may sprinkle into the text.
//! The enclosing armor framing (header and footer lines, CRC24 checksum)
//! belongs to a higher layer and is not handled here.
//!
//! # Quick Examples
//!
//! Armor a message:
//! ```
//! assert_eq!(armor64::encode("my message"), "bXkgbWVzc2FnZQ==\n");
//! ```
//!
//! Recover binary data, tolerating embedded whitespace:
//! ```
//! let data = armor64::decode(" QUJD \r\n").unwrap();
//! assert_eq!(data, b"ABC");
//! ```
//!
//! Stream chunk by chunk; chunk boundaries never show in the output:
//! ```
//! let mut encoder = armor64::Encoder::new();
//! let mut armored = String::new();
//! for chunk in [&b"binary "[..], b"packet ", b"data"] {
//!     armored.push_str(&encoder.on_chunk(chunk));
//! }
//! armored.push_str(&encoder.finish());
//! assert_eq!(armored, armor64::encode(b"binary packet data"));
//! ```
//!
//! Or drive a transform from any chunk source:
//! ```
//! use armor64::stream::pipeline;
//!
//! let chunks: Vec<Vec<u8>> = vec![b"QU".to_vec(), b"JD".to_vec()];
//! let decoded: Result<Vec<_>, _> = pipeline(chunks, armor64::Decoder::new()).collect();
//! assert_eq!(decoded.unwrap().concat(), b"ABC");
//! ```

#![deny(missing_docs)]

pub use crate::alphabet::{Alphabet, Std, UrlSafe};
pub use crate::decode::{DecodeError, Decoder};
pub use crate::display::Display;
pub use crate::encode::Encoder;

/// Encode and decode using the standard character set with `=` padding.
///
/// This is the alphabet of the armor wire format.
pub const STD: Std = Std;

/// Encode using the URL safe character set *without* padding.
pub const URL_SAFE: UrlSafe = UrlSafe;

/// Armor a complete value: 60-character lines, each terminated by a line
/// feed, with the final shorter line included. Empty input produces an
/// empty string.
///
/// ```
/// assert_eq!(armor64::encode(b"ABC"), "QUJD\n");
/// assert_eq!(armor64::encode(b""), "");
/// ```
pub fn encode<I>(input: &I) -> String
where
    I: AsRef<[u8]> + ?Sized,
{
    let mut encoder = Encoder::new();
    let mut out = encoder.on_chunk(input.as_ref());
    out.push_str(&encoder.finish());
    out
}

/// Decode a complete armored value. Whitespace (space, tab, CR, LF) may
/// appear anywhere, and the final quartet may be padded or not.
pub fn decode<I>(input: &I) -> Result<Vec<u8>, DecodeError>
where
    I: AsRef<[u8]> + ?Sized,
{
    let mut decoder = Decoder::new();
    let mut out = decoder.on_chunk(input.as_ref())?;
    out.extend(decoder.finish()?);
    Ok(out)
}

/// Decode accepting the standard and URL safe alphabets interchangeably.
///
/// The input is normalized (`-` to `+`, `_` to `/`) before decoding, so
/// unpadded transport encodings round trip as well.
///
/// ```
/// assert_eq!(armor64::decode_any("-_-_").unwrap(), armor64::decode("+/+/").unwrap());
/// ```
pub fn decode_any<I>(input: &I) -> Result<Vec<u8>, DecodeError>
where
    I: AsRef<[u8]> + ?Sized,
{
    let normalized: Vec<u8> = input
        .as_ref()
        .iter()
        .map(|&byte| match byte {
            b'-' => b'+',
            b'_' => b'/',
            other => other,
        })
        .collect();
    decode(&normalized)
}

/// Encode a complete value on a single line with no line feeds, padded
/// according to the alphabet: [`STD`] pads with `=`, while [`URL_SAFE`]
/// omits padding for transport-compact output.
///
/// ```
/// assert_eq!(armor64::encode_compact(armor64::STD, b"A"), "QQ==");
/// assert_eq!(armor64::encode_compact(armor64::URL_SAFE, b"A"), "QQ");
/// ```
pub fn encode_compact<A, I>(alphabet: A, input: &I) -> String
where
    A: Alphabet,
    I: AsRef<[u8]> + ?Sized,
{
    let input = input.as_ref();
    let mut out = Vec::with_capacity(input.len() / 3 * 4 + 4);
    encode::encode_into(alphabet, input, &mut out);
    encode::into_ascii_string(out)
}

mod private {
    use crate::u6::U6;

    pub trait SealedAlphabet {
        /// Encodes the six bits of input into the matching alphabet byte.
        fn encode_u6(self, input: U6) -> u8;

        /// Decodes an alphabet byte back into six bits.
        /// tables::INVALID_VALUE is returned on bytes outside the alphabet.
        fn decode_u8(self, input: u8) -> u8;

        /// The padding byte appended to a final partial quartet, if any.
        fn padding_byte(self) -> Option<u8>;
    }
}

// mod definitions appear after the re-exports they feed.
mod alphabet;
pub(crate) mod decode;
pub(crate) mod display;
pub(crate) mod encode;
pub mod io;
pub mod stream;
pub(crate) mod tables;
pub(crate) mod u6;
