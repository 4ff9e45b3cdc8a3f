#![no_main]
use libfuzzer_sys::fuzz_target;

// Decoding arbitrary input must never panic, and whenever whole-input
// decoding succeeds, chunked decoding must agree with it.
fuzz_target!(|data: &[u8]| {
    let whole = armor64::decode(&data);

    let mut decoder = armor64::Decoder::new();
    let streamed = (move || {
        let mut out = Vec::new();
        for chunk in data.chunks(3) {
            out.extend(decoder.on_chunk(chunk)?);
        }
        out.extend(decoder.finish()?);
        Ok::<_, armor64::DecodeError>(out)
    })();

    if let Ok(bytes) = whole {
        assert_eq!(streamed.expect("chunked decode must succeed"), bytes);
    }

    let _ = armor64::decode_any(&data);
});
