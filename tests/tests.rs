use armor64::{decode, decode_any, encode, encode_compact, Decoder, Encoder, STD, URL_SAFE};
use proptest::collection::vec;
use proptest::prelude::{any, proptest, Just, Strategy};
use proptest::sample::Index;
use std::io::Read;

const WHITESPACE: [u8; 4] = [b' ', b'\t', b'\r', b'\n'];

// A random buffer along with chunk sizes used to split it. The sizes are
// kept small relative to the buffer to exercise the residual bookkeeping.
fn vec_and_chunk_sizes() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    vec(any::<u8>(), 0..200).prop_flat_map(|v| {
        let len = std::cmp::max(v.len(), 1);
        let max_chunk = std::cmp::max(2, len / 3);
        (Just(v), vec(1..max_chunk, 1..6))
    })
}

// Split data into chunks whose lengths cycle through `sizes`.
fn chunks_of<'a>(data: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut sizes = sizes.iter().cycle();
    while !rest.is_empty() {
        let take = std::cmp::min(*sizes.next().expect("sizes is never empty"), rest.len());
        let (head, tail) = rest.split_at(take);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

// Read to EOF, issuing reads whose sizes cycle through `sizes` to shake out
// chunk-boundary bugs in the reader.
fn read_in_varying_sizes<R: Read>(mut reader: R, sizes: &[usize]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    for &size in sizes.iter().cycle() {
        let start = out.len();
        out.resize(start + size, 0);
        let n = reader.read(&mut out[start..])?;
        out.truncate(start + n);
        if n == 0 {
            return Ok(out);
        }
    }
    unreachable!();
}

proptest! {
    #[test]
    fn roundtrip(input in any::<Vec<u8>>()) {
        let decoded = decode(&encode(&input)).expect("decode failed");
        assert_eq!(input, decoded);
    }

    #[test]
    fn line_shape(input in any::<Vec<u8>>()) {
        let armored = encode(&input);
        if input.is_empty() {
            assert_eq!(armored, "");
        } else {
            assert!(armored.ends_with('\n'));
            let lines: Vec<&str> = armored[..armored.len() - 1].split('\n').collect();
            for line in &lines[..lines.len() - 1] {
                assert_eq!(line.len(), 60);
            }
            let last = lines[lines.len() - 1];
            assert!(!last.is_empty() && last.len() <= 60);
        }
    }

    #[test]
    fn encode_chunking_is_invisible((input, sizes) in vec_and_chunk_sizes()) {
        let whole = encode(&input);
        let mut encoder = Encoder::new();
        let mut streamed = String::new();
        for chunk in chunks_of(&input, &sizes) {
            streamed.push_str(&encoder.on_chunk(chunk));
        }
        streamed.push_str(&encoder.finish());
        assert_eq!(whole, streamed);
    }

    #[test]
    fn decode_chunking_is_invisible((input, sizes) in vec_and_chunk_sizes()) {
        let armored = encode(&input);
        let mut decoder = Decoder::new();
        let mut streamed = Vec::new();
        for chunk in chunks_of(armored.as_bytes(), &sizes) {
            streamed.extend(decoder.on_chunk(chunk).expect("decode failed"));
        }
        streamed.extend(decoder.finish().expect("decode failed"));
        assert_eq!(input, streamed);
    }

    #[test]
    fn whitespace_anywhere_is_ignored(
        input in any::<Vec<u8>>(),
        insertions in vec((any::<Index>(), 0..4usize), 0..24),
    ) {
        let mut armored = encode(&input).into_bytes();
        for (position, which) in insertions {
            let at = position.index(armored.len() + 1);
            armored.insert(at, WHITESPACE[which]);
        }
        assert_eq!(decode(&armored).expect("decode failed"), input);
    }

    #[test]
    fn url_safe_roundtrip(input in any::<Vec<u8>>()) {
        let compact = encode_compact(URL_SAFE, &input);
        assert!(!compact.contains('+'));
        assert!(!compact.contains('/'));
        assert!(!compact.contains('='));
        assert_eq!(decode_any(&compact).expect("decode failed"), input);
    }

    #[test]
    fn compact_matches_wrapped(input in any::<Vec<u8>>()) {
        let compact = encode_compact(STD, &input);
        let unwrapped: String = encode(&input).split('\n').collect();
        assert_eq!(compact, unwrapped);
    }

    #[test]
    fn decode_any_accepts_standard_output(input in any::<Vec<u8>>()) {
        assert_eq!(decode_any(&encode(&input)).expect("decode failed"), input);
    }

    #[test]
    fn io_adapters_roundtrip((input, sizes) in vec_and_chunk_sizes()) {
        use armor64::io::{DecodeReader, EncodeWriter};
        use std::io::{Cursor, Write};

        let mut writer = EncodeWriter::new(Vec::new());
        for chunk in chunks_of(&input, &sizes) {
            writer.write_all(chunk).expect("in-memory write");
        }
        let armored = writer.finish().expect("in-memory finish");
        assert_eq!(armored, encode(&input).into_bytes());

        let reader = DecodeReader::new(Cursor::new(armored));
        let decoded = read_in_varying_sizes(reader, &sizes).expect("read failed");
        assert_eq!(input, decoded);
    }
}

#[test]
fn encode_empty() {
    assert_eq!(encode(b""), "");
}

#[test]
fn decode_empty() {
    assert_eq!(decode(""), Ok(vec![]));
}

#[test]
fn encode_three_bytes_is_one_short_line() {
    assert_eq!(encode(b"ABC"), "QUJD\n");
}

#[test]
fn decode_without_terminator() {
    assert_eq!(decode("QUJD").expect("decode failed"), b"ABC");
}

#[test]
fn decode_interleaved_whitespace() {
    assert_eq!(decode(" Q\tU J\nD ").expect("decode failed"), b"ABC");
}

#[test]
fn decode_split_mid_quartet() {
    let mut decoder = Decoder::new();
    let mut out = decoder.on_chunk(b"QU").expect("decode failed");
    out.extend(decoder.on_chunk(b"JD").expect("decode failed"));
    out.extend(decoder.finish().expect("decode failed"));
    assert_eq!(out, b"ABC");
}

#[test]
fn whitespace_on_quartet_boundary() {
    // A line feed arriving as its own chunk exactly between two quartets
    // must not disturb alignment.
    let mut decoder = Decoder::new();
    let mut out = Vec::new();
    for chunk in [&b"QUJD"[..], b"\n", b"RUZH", b"\n"] {
        out.extend(decoder.on_chunk(chunk).expect("decode failed"));
    }
    out.extend(decoder.finish().expect("decode failed"));
    assert_eq!(out, b"ABCEFG");
}

#[test]
fn whitespace_split_from_its_quartet() {
    // The same text split inside the whitespace run and inside a quartet.
    let mut decoder = Decoder::new();
    let mut out = Vec::new();
    for chunk in [&b"QUJD\n "[..], b" \nRU", b"ZH"] {
        out.extend(decoder.on_chunk(chunk).expect("decode failed"));
    }
    out.extend(decoder.finish().expect("decode failed"));
    assert_eq!(out, b"ABCEFG");
}

#[test]
fn forty_five_bytes_fill_exactly_one_line() {
    let armored = encode(&[0x41u8; 45]);
    assert_eq!(armored, format!("{}\n", "QUFB".repeat(15)));
}

#[test]
fn forty_six_bytes_spill_into_a_short_line() {
    let armored = encode(&[0x41u8; 46]);
    assert_eq!(armored, format!("{}\nQQ==\n", "QUFB".repeat(15)));
}

#[test]
fn rejects_bytes_outside_the_alphabet() {
    assert_eq!(decode("QUJ*"), Err(armor64::DecodeError::InvalidByte(b'*')));
}

#[test]
fn rejects_dangling_character_at_end_of_stream() {
    let mut decoder = Decoder::new();
    assert_eq!(decoder.on_chunk(b"QUJDQ").expect("aligned prefix"), b"ABC");
    assert_eq!(decoder.finish(), Err(armor64::DecodeError::InvalidLength));
}

#[test]
fn upstream_failure_suppresses_the_finalizer() {
    use armor64::stream::try_pipeline;

    #[derive(Debug, PartialEq)]
    enum StreamError {
        Upstream,
        Codec(armor64::DecodeError),
    }

    impl From<armor64::DecodeError> for StreamError {
        fn from(err: armor64::DecodeError) -> Self {
            StreamError::Codec(err)
        }
    }

    let source: Vec<Result<Vec<u8>, StreamError>> =
        vec![Ok(b"QUJD".to_vec()), Err(StreamError::Upstream)];
    let mut pipe = try_pipeline(source, Decoder::new());
    assert_eq!(pipe.next(), Some(Ok(b"ABC".to_vec())));
    assert_eq!(pipe.next(), Some(Err(StreamError::Upstream)));
    assert_eq!(pipe.next(), None);
}

#[test]
fn pipeline_runs_the_finalizer_exactly_once() {
    use armor64::stream::pipeline;

    let chunks: Vec<&[u8]> = vec![b"AB", b"C", b""];
    let outputs: Vec<String> = pipeline(chunks, Encoder::new())
        .map(|step| step.expect("encoding is infallible"))
        .collect();
    assert_eq!(outputs, ["", "", "", "QUJD\n"]);
}
