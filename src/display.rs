use crate::encode::{encode_into, BYTES_PER_LINE, CHARS_PER_LINE};
use std::fmt;

/// Display is a convenience wrapper that writes the line-wrapped armor text
/// of the wrapped data through a `fmt::Formatter`, one line at a time,
/// without building the whole output in memory.
///
/// ```
/// let wrapped = armor64::Display::new(b"ABC");
/// assert_eq!(wrapped.to_string(), "QUJD\n");
/// ```
pub struct Display<'a> {
    data: &'a [u8],
}

impl<'a> Display<'a> {
    /// Wrap the data, providing a Display implementation that emits its
    /// armor text.
    pub fn new<T>(data: &'a T) -> Self
    where
        T: AsRef<[u8]> + ?Sized,
    {
        Display {
            data: data.as_ref(),
        }
    }
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut line = Vec::with_capacity(CHARS_PER_LINE + 1);
        for group in self.data.chunks(BYTES_PER_LINE) {
            line.clear();
            encode_into(crate::STD, group, &mut line);
            line.push(b'\n');
            // Encoded output is always ascii and therefore valid utf8.
            debug_assert!(line.iter().all(u8::is_ascii));
            f.write_str(unsafe { std::str::from_utf8_unchecked(&line) })?;
        }
        Ok(())
    }
}
