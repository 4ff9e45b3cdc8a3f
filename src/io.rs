//! Adapters between the streaming codec and `std::io`.
//!
//! ### Decode armor text from stdin and write the binary to stdout.
//! ```no_run
//! use armor64::io::DecodeReader;
//! use std::io;
//!
//! let mut src = DecodeReader::new(io::stdin());
//! let mut dst = io::stdout();
//! io::copy(&mut src, &mut dst)?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ### Read data from stdin and write it armored to stdout.
//! ```no_run
//! use armor64::io::EncodeWriter;
//! use std::io;
//!
//! let mut dst = EncodeWriter::new(io::stdout());
//! io::copy(&mut io::stdin(), &mut dst)?;
//! dst.finish()?;
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::{DecodeError, Decoder, Encoder};
use std::io;
use std::io::{Read, Write};

/// Armor data written to it, forwarding the text to an inner writer.
///
/// The inner writer sees output only as complete lines become available.
/// Call [`finish`](EncodeWriter::finish) to flush the final partial line;
/// dropping the writer flushes it on a best effort basis, ignoring errors.
pub struct EncodeWriter<W: Write> {
    // Both are consumed by finish; Drop flushes whatever is left.
    encoder: Option<Encoder>,
    inner: Option<W>,
}

impl<W: Write> EncodeWriter<W> {
    /// Create a new EncodeWriter that wraps the provided writer.
    pub fn new(writer: W) -> Self {
        EncodeWriter {
            encoder: Some(Encoder::new()),
            inner: Some(writer),
        }
    }

    /// Indicate that no more data will be written. The final line is
    /// flushed and the inner writer returned.
    pub fn finish(mut self) -> io::Result<W> {
        let encoder = self.encoder.take().unwrap();
        let mut inner = self.inner.take().unwrap();
        inner.write_all(encoder.finish().as_bytes())?;
        Ok(inner)
    }
}

impl<W: Write> Write for EncodeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = self.encoder.as_mut().unwrap().on_chunk(buf);
        self.inner.as_mut().unwrap().write_all(text.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.as_mut().unwrap().flush()
    }
}

impl<W: Write> Drop for EncodeWriter<W> {
    fn drop(&mut self) {
        if let (Some(encoder), Some(inner)) = (self.encoder.take(), self.inner.as_mut()) {
            let _ = inner.write_all(encoder.finish().as_bytes());
        }
    }
}

/// Decode armor text read from an inner reader.
pub struct DecodeReader<R: Read> {
    inner: R,
    // Taken on EOF or on a decode error; None means no further input.
    decoder: Option<Decoder>,
    // Decoded bytes not yet handed to the caller.
    pending: Vec<u8>,
    pos: usize,
}

impl<R: Read> DecodeReader<R> {
    /// Create a new DecodeReader that wraps the provided reader.
    pub fn new(reader: R) -> Self {
        DecodeReader {
            inner: reader,
            decoder: Some(Decoder::new()),
            pending: Vec::new(),
            pos: 0,
        }
    }
}

fn into_io_err(err: DecodeError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

impl<R: Read> Read for DecodeReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        while self.pos == self.pending.len() {
            if self.decoder.is_none() {
                return Ok(0);
            }
            let mut chunk = [0u8; 1024];
            let n = self.inner.read(&mut chunk)?;
            let step = if n == 0 {
                self.decoder.take().unwrap().finish()
            } else {
                self.decoder.as_mut().unwrap().on_chunk(&chunk[..n])
            };
            match step {
                Ok(decoded) => {
                    self.pending = decoded;
                    self.pos = 0;
                }
                Err(err) => {
                    self.decoder = None;
                    return Err(into_io_err(err));
                }
            }
        }
        let available = &self.pending[self.pos..];
        let count = available.len().min(out.len());
        out[..count].copy_from_slice(&available[..count]);
        self.pos += count;
        Ok(count)
    }
}
