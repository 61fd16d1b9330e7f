use super::constants::NUL_CONTINUATION;
use crate::errors::{DecodeError, Result};
use bytes::Bytes;
use tracing::debug;

/// Escape written between the segments of a string that contained NUL bytes.
pub const NUL_ESCAPE: &str = "\\0";

/// A read-only view over KeyString bytes with a forward-only read position.
///
/// Every read is bounds-checked; a read that would run past the end of the view
/// fails with [`DecodeError::BufferTooSmall`] and leaves the position untouched.
///
/// # Example
///
/// ```
/// use keystring::encoding::ByteCursor;
///
/// let mut cursor = ByteCursor::from_hex("82000000010000000204").unwrap();
///
/// assert_eq!(cursor.read_byte().unwrap(), 0x82);
/// assert_eq!(cursor.read_u32_be().unwrap(), 1);
/// assert_eq!(cursor.read_u32_be().unwrap(), 2);
/// assert_eq!(cursor.peek(), Some(0x04));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteCursor {
    data: Bytes,
    position: usize,
}

impl ByteCursor {
    /// Creates a cursor over `data`, positioned at its first byte.
    pub fn new<B: Into<Bytes>>(data: B) -> Self {
        ByteCursor {
            data: data.into(),
            position: 0,
        }
    }

    /// Decodes `hex` and creates a cursor over the resulting bytes.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError::InvalidHex`] if `hex` has odd length or contains a
    /// character that is not a hex digit.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = hex::decode(hex)?;
        Ok(ByteCursor::new(bytes))
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize { self.position }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize { self.data.len() }

    /// Indicates whether every byte has been consumed.
    pub fn is_exhausted(&self) -> bool { self.data.is_empty() }

    /// True iff strictly more than `n` bytes remain, so that at least one byte
    /// (conventionally the level terminator) is still left after consuming `n`.
    pub fn available(&self, n: usize) -> bool { self.remaining() > n }

    /// Returns the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> { self.data.first().cloned() }

    fn too_small(&self, wanted: usize) -> DecodeError {
        DecodeError::BufferTooSmall {
            wanted,
            remaining: self.remaining(),
            position: self.position,
        }
    }

    fn advance(&mut self, n: usize) {
        self.data.advance(n);
        self.position += n;
    }

    fn split_to(&mut self, n: usize) -> Bytes {
        self.position += n;
        self.data.split_to(n)
    }

    /// Consumes one byte.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        match self.peek() {
            Some(byte) => {
                self.advance(1);
                Ok(byte)
            }
            None => Err(self.too_small(1)),
        }
    }

    /// Consumes `n` bytes, honoring the [`available`](ByteCursor::available)
    /// reservation: the read fails unless a byte would still remain afterwards.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        if self.available(n) {
            Ok(self.split_to(n))
        } else {
            Err(self.too_small(n.saturating_add(1)))
        }
    }

    #[inline]
    fn read_be(&mut self, len: usize) -> Result<u64> {
        if self.remaining() < len {
            return Err(self.too_small(len));
        }
        let mut out = 0u64;
        for _ in 0..len {
            out = (out << 8) | u64::from(self.read_byte()?);
        }
        Ok(out)
    }

    /// Consumes a big-endian `u32`.
    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32> { self.read_be(4).map(|n| n as u32) }

    /// Consumes a big-endian `u64`.
    #[inline]
    pub fn read_u64_be(&mut self) -> Result<u64> { self.read_be(8) }

    /// Reads up to the next NUL, consuming it, or to the end of the buffer if there
    /// is none. Running out of bytes before a terminator is not an error.
    pub fn read_cstring_bytes(&mut self) -> Bytes {
        let len = self
            .data
            .iter()
            .position(|&b| b == 0)
            .unwrap_or_else(|| self.remaining());
        let segment = self.split_to(len);

        // best effort, the terminator may be missing at end of buffer
        if self.read_byte().is_err() {
            debug!(position = self.position, "cstring ended without terminator");
        }
        segment
    }

    /// Reads a NUL-terminated string, see
    /// [`read_cstring_bytes`](ByteCursor::read_cstring_bytes).
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError::InvalidUtf8`] if the bytes are not valid UTF-8.
    pub fn read_cstring(&mut self) -> Result<String> {
        let start = self.position;
        utf8(self.read_cstring_bytes(), start)
    }

    /// Reads a string that may contain embedded NULs.
    ///
    /// Such strings are stored as NUL-terminated segments, each followed by `0xff`
    /// when another segment follows. Segments are joined with the two-character
    /// escape [`NUL_ESCAPE`].
    ///
    /// # Example
    ///
    /// ```
    /// use keystring::encoding::ByteCursor;
    ///
    /// let mut cursor = ByteCursor::new(&b"A\x00\xffB\x00"[..]);
    ///
    /// assert_eq!(cursor.read_cstring_with_nulls().unwrap(), "A\\0B");
    /// assert!(cursor.is_exhausted());
    /// ```
    pub fn read_cstring_with_nulls(&mut self) -> Result<String> {
        let mut out = self.read_cstring()?;
        while self.peek() == Some(NUL_CONTINUATION) {
            self.advance(1);
            out.push_str(NUL_ESCAPE);
            out.push_str(&self.read_cstring()?);
        }
        Ok(out)
    }
}

fn utf8(bytes: Bytes, position: usize) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { position })
}

impl From<Vec<u8>> for ByteCursor {
    fn from(v: Vec<u8>) -> Self { ByteCursor::new(v) }
}

impl<'a> From<&'a [u8]> for ByteCursor {
    fn from(s: &'a [u8]) -> Self { ByteCursor::new(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_hex_is_rejected() {
        assert_eq!(
            ByteCursor::from_hex("123").unwrap_err(),
            DecodeError::InvalidHex(hex::FromHexError::OddLength)
        );
        assert!(match ByteCursor::from_hex("zz") {
            Err(DecodeError::InvalidHex(_)) => true,
            _ => false,
        });
    }

    #[test]
    fn available_reserves_one_byte() {
        let cursor = ByteCursor::new(vec![1, 2, 3]);
        assert!(cursor.available(2));
        assert!(!cursor.available(3));
        assert!(!ByteCursor::new(Vec::new()).available(0));
    }

    #[test]
    fn read_bytes_keeps_the_last_byte() {
        let mut cursor = ByteCursor::new(vec![1, 2, 3]);
        assert!(cursor.read_bytes(3).is_err());
        assert_eq!(cursor.position(), 0);

        assert_eq!(&cursor.read_bytes(2).unwrap()[..], &[1, 2]);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(
            cursor.read_bytes(1).unwrap_err(),
            DecodeError::BufferTooSmall {
                wanted: 2,
                remaining: 1,
                position: 2,
            }
        );
    }

    #[test]
    fn huge_reads_fail_cleanly() {
        let mut cursor = ByteCursor::new(vec![1, 2, 3]);
        assert_eq!(
            cursor.read_bytes(usize::max_value()).unwrap_err(),
            DecodeError::BufferTooSmall {
                wanted: usize::max_value(),
                remaining: 3,
                position: 0,
            }
        );
        assert_eq!(cursor.remaining(), 3);
    }

    #[test]
    fn read_byte_at_end() {
        let mut cursor = ByteCursor::new(vec![7]);
        assert_eq!(cursor.read_byte().unwrap(), 7);
        assert_eq!(cursor.peek(), None);
        assert!(cursor.read_byte().unwrap_err().is_truncation());
    }

    #[test]
    fn big_endian_reads() {
        let mut cursor = ByteCursor::new(vec![0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(cursor.read_u32_be().unwrap(), 256);
        assert_eq!(cursor.read_u64_be().unwrap(), 2);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn short_fixed_width_read_consumes_nothing() {
        let mut cursor = ByteCursor::new(vec![0, 0, 1]);
        assert!(cursor.read_u32_be().is_err());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn cstring_without_terminator() {
        let mut cursor = ByteCursor::new(&b"abc"[..]);
        assert_eq!(cursor.read_cstring().unwrap(), "abc");
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn cstring_stops_at_first_nul() {
        let mut cursor = ByteCursor::new(&b"ab\x00cd\x00"[..]);
        assert_eq!(cursor.read_cstring().unwrap(), "ab");
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.read_cstring().unwrap(), "cd");
    }

    #[test]
    fn cstring_with_nulls() {
        let mut cursor = ByteCursor::new(&b"A\x00\xffB\x00\x3c"[..]);
        assert_eq!(cursor.read_cstring_with_nulls().unwrap(), "A\\0B");
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.peek(), Some(0x3c));

        let mut cursor = ByteCursor::new(&b"\x00\xff\x00\xffx\x00"[..]);
        assert_eq!(cursor.read_cstring_with_nulls().unwrap(), "\\0\\0x");
    }

    #[test]
    fn invalid_utf8() {
        let mut cursor = ByteCursor::new(vec![0x01, 0xc3, 0x28, 0x00]);
        cursor.read_byte().unwrap();
        assert_eq!(
            cursor.read_cstring().unwrap_err(),
            DecodeError::InvalidUtf8 { position: 1 }
        );
    }
}
