use failure::Fail;
use std::fmt;

/// Result of a KeyString decode operation.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// The numeric encodings this decoder recognizes but does not materialize.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumericGap {
    /// Not-a-number.
    NaN,
    /// Magnitudes of at least `2^63`, including the infinities.
    LargeMagnitude,
    /// Values strictly between `-1` and `1`, other than zero.
    SmallMagnitude,
    /// An integer-range value whose fractional-part flag is set.
    FractionalPart,
}

impl fmt::Display for NumericGap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            NumericGap::NaN => "NaN",
            NumericGap::LargeMagnitude => "large magnitude",
            NumericGap::SmallMagnitude => "small magnitude",
            NumericGap::FractionalPart => "fractional part",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Fail)]
/// An error encountered when decoding fails.
///
/// A decode call either returns a complete value or one of these, never a partial
/// result.
pub enum DecodeError {
    /// The input was not a valid hex string (odd length or a non-hex digit).
    #[fail(display = "invalid hex input: {}", _0)]
    InvalidHex(#[fail(cause)] hex::FromHexError),

    /// A read needed more bytes than the buffer has left.
    #[fail(
        display = "buffer too small: wanted {} byte(s) at offset {}, {} remaining",
        wanted, position, remaining
    )]
    BufferTooSmall {
        wanted: usize,
        remaining: usize,
        position: usize,
    },

    /// The tag byte does not name any KeyString type this decoder reads.
    #[fail(display = "unsupported tag {:#04x} at offset {}", tag, position)]
    UnsupportedTag { tag: u8, position: usize },

    /// The tag is numeric but its value cannot be reconstructed exactly.
    #[fail(
        display = "unsupported numeric encoding ({}) for tag {:#04x} at offset {}",
        gap, tag, position
    )]
    UnsupportedNumeric {
        tag: u8,
        gap: NumericGap,
        position: usize,
    },

    /// A level terminator showed up where a value was expected.
    #[fail(display = "unexpected level terminator at offset {}", position)]
    UnexpectedTerminator { position: usize },

    /// A string or field name was not valid UTF-8.
    #[fail(display = "invalid utf-8 in string at offset {}", position)]
    InvalidUtf8 { position: usize },

    /// Documents and arrays were nested deeper than the configured limit.
    #[fail(display = "nesting depth exceeds the limit of {}", limit)]
    DepthLimitExceeded { limit: usize },
}

impl From<hex::FromHexError> for DecodeError {
    fn from(e: hex::FromHexError) -> Self { DecodeError::InvalidHex(e) }
}

impl DecodeError {
    /// Indicates whether the error came from running out of input.
    pub fn is_truncation(&self) -> bool {
        match self {
            DecodeError::BufferTooSmall { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offset() {
        let e = DecodeError::UnsupportedTag {
            tag: 0xc8,
            position: 3,
        };
        assert_eq!(e.to_string(), "unsupported tag 0xc8 at offset 3");

        let e = DecodeError::UnsupportedNumeric {
            tag: 30,
            gap: NumericGap::NaN,
            position: 0,
        };
        assert_eq!(
            e.to_string(),
            "unsupported numeric encoding (NaN) for tag 0x1e at offset 0"
        );
    }

    #[test]
    fn hex_errors_convert() {
        let e: DecodeError = hex::decode("abc").unwrap_err().into();
        assert_eq!(e, DecodeError::InvalidHex(hex::FromHexError::OddLength));
        assert!(!e.is_truncation());
    }
}
