use crate::alphabet::Alphabet;
use crate::u6::U6;
use arrayref::array_ref;

cfg_if::cfg_if! {
    if #[cfg(feature = "wide")] {
        pub(crate) mod wide;
    }
}

// 45 input bytes encode to exactly one full line of output.
pub(crate) const BYTES_PER_LINE: usize = 45;
// Width of every complete armor line.
pub(crate) const CHARS_PER_LINE: usize = 60;

/// Append the encoding of `input` to `out`. A final partial quartet is
/// padded according to the alphabet.
pub(crate) fn encode_into<A: Alphabet>(alphabet: A, input: &[u8], out: &mut Vec<u8>) {
    #[cfg(feature = "wide")]
    let input = &input[wide::encode_blocks(alphabet, input, out)..];
    encode_quartets(alphabet, input, out);
}

// The per-quartet path: three input bytes at a time, then the padded tail.
pub(crate) fn encode_quartets<A: Alphabet>(alphabet: A, input: &[u8], out: &mut Vec<u8>) {
    let mut chunks = input.chunks_exact(3);
    for chunk in chunks.by_ref() {
        encode_quartet(alphabet, array_ref![chunk, 0, 3], out);
    }
    match *chunks.remainder() {
        [] => {}
        [a] => {
            out.push(alphabet.encode_u6(U6::from_low_six_bits(a >> 2)));
            out.push(alphabet.encode_u6(U6::from_low_six_bits(a << 4)));
            if let Some(padding) = alphabet.padding_byte() {
                out.push(padding);
                out.push(padding);
            }
        }
        [a, b] => {
            out.push(alphabet.encode_u6(U6::from_low_six_bits(a >> 2)));
            out.push(alphabet.encode_u6(U6::from_low_six_bits(a << 4 | b >> 4)));
            out.push(alphabet.encode_u6(U6::from_low_six_bits(b << 2)));
            if let Some(padding) = alphabet.padding_byte() {
                out.push(padding);
            }
        }
        _ => unreachable!("impossible remainder"),
    }
}

#[inline]
fn encode_quartet<A: Alphabet>(alphabet: A, input: &[u8; 3], out: &mut Vec<u8>) {
    out.push(alphabet.encode_u6(U6::from_low_six_bits(input[0] >> 2)));
    out.push(alphabet.encode_u6(U6::from_low_six_bits(input[0] << 4 | input[1] >> 4)));
    out.push(alphabet.encode_u6(U6::from_low_six_bits(input[1] << 2 | input[2] >> 6)));
    out.push(alphabet.encode_u6(U6::from_low_six_bits(input[2])));
}

// The built-in alphabets only produce ascii, so the utf8 check on encoded
// output can be bypassed.
pub(crate) fn into_ascii_string(out: Vec<u8>) -> String {
    debug_assert!(out.iter().all(u8::is_ascii));
    unsafe { String::from_utf8_unchecked(out) }
}

/// Streaming armor-body encoder.
///
/// Feed binary chunks with [`on_chunk`](Encoder::on_chunk); each call
/// returns the complete 60-character lines that became available, each
/// terminated by a line feed. [`finish`](Encoder::finish) flushes the
/// remaining bytes as a final shorter line. Splitting the input differently
/// never changes the concatenated output.
///
/// An `Encoder` carries the residual of a single stream; create a fresh one
/// for every stream.
///
/// ```
/// let mut encoder = armor64::Encoder::new();
/// let mut armored = encoder.on_chunk(b"AB");
/// armored.push_str(&encoder.on_chunk(b"C"));
/// armored.push_str(&encoder.finish());
/// assert_eq!(armored, "QUJD\n");
/// ```
#[derive(Debug, Default)]
pub struct Encoder {
    // Bytes not yet forming a complete 45 byte line group.
    residual: Vec<u8>,
}

impl Encoder {
    /// Create an encoder with an empty residual.
    pub fn new() -> Self {
        Encoder {
            residual: Vec::with_capacity(BYTES_PER_LINE),
        }
    }

    /// Absorb one chunk of binary input and return the lines it completed.
    ///
    /// Returns the empty string whenever fewer than 45 bytes are buffered.
    pub fn on_chunk(&mut self, chunk: &[u8]) -> String {
        self.residual.extend_from_slice(chunk);
        let lines = self.residual.len() / BYTES_PER_LINE;
        let consumed = lines * BYTES_PER_LINE;
        let mut out = Vec::with_capacity(lines * (CHARS_PER_LINE + 1));
        for group in self.residual[..consumed].chunks_exact(BYTES_PER_LINE) {
            encode_into(crate::STD, group, &mut out);
            out.push(b'\n');
        }
        self.residual.drain(..consumed);
        into_ascii_string(out)
    }

    /// Flush the residual as a final line of at most 60 characters.
    ///
    /// An empty residual produces an empty string with no terminator.
    pub fn finish(self) -> String {
        if self.residual.is_empty() {
            return String::new();
        }
        let mut out = Vec::with_capacity(CHARS_PER_LINE + 1);
        encode_into(crate::STD, &self.residual, &mut out);
        out.push(b'\n');
        into_ascii_string(out)
    }
}

impl crate::stream::Transform for Encoder {
    type Output = String;
    type Error = std::convert::Infallible;

    fn on_chunk(&mut self, chunk: &[u8]) -> Result<String, Self::Error> {
        Ok(Encoder::on_chunk(self, chunk))
    }

    fn on_end(self) -> Result<String, Self::Error> {
        Ok(self.finish())
    }
}
