//! The sign/magnitude integer encoding carried by the numeric tag range.
//!
//! Numeric tags are laid out symmetrically around zero:
//!
//! | Tag       | Meaning                              |
//! | ---       | ---                                  |
//! | `30`      | NaN                                  |
//! | `31`      | `<= -2^63`, including `-inf`         |
//! | `32..=39` | negative 8-byte .. 1-byte integers   |
//! | `40`      | `(-1, 0)`                            |
//! | `41`      | zero                                 |
//! | `42`      | `(0, 1)`                             |
//! | `43..=50` | positive 1-byte .. 8-byte integers   |
//! | `51`      | `>= 2^63`, including `+inf`          |
//!
//! An N-byte integer stores `(magnitude << 1) | has_fraction` in N big-endian bytes.
//! Negative values store the bitwise complement of those bytes, so that unsigned
//! byte-wise comparison still gives numeric order.

use super::constants::*;
use super::cursor::ByteCursor;
use crate::errors::{NumericGap, Result};

/// Sign of an integer-range numeric tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sign {
    /// Magnitude bytes are complemented.
    Negative,
    /// Magnitude bytes are stored as is.
    Positive,
}

/// Numeric sub-kinds, one per numeric tag (integer tags grouped by width).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumericTag {
    /// Not-a-number, tag `30`.
    NaN,
    /// `<= -2^63`, tag `31`.
    NegativeLargeMagnitude,
    /// Negative integer stored in the given number of bytes.
    NegativeInt(u8),
    /// In `(-1, 0)`, tag `40`.
    NegativeSmallMagnitude,
    /// Zero, tag `41`. No payload follows.
    Zero,
    /// In `(0, 1)`, tag `42`.
    PositiveSmallMagnitude,
    /// Positive integer stored in the given number of bytes.
    PositiveInt(u8),
    /// `>= 2^63`, tag `51`.
    PositiveLargeMagnitude,
}

impl NumericTag {
    /// Classifies a numeric tag byte, or returns `None` outside the numeric range.
    pub fn from_byte(tag: u8) -> Option<NumericTag> {
        use NumericTag::*;
        let kind = match tag {
            NUMERIC_NAN => NaN,
            NUMERIC_NEGATIVE_LARGE_MAGNITUDE => NegativeLargeMagnitude,
            NUMERIC_NEGATIVE_8_BYTE_INT..=NUMERIC_NEGATIVE_1_BYTE_INT => {
                NegativeInt(NUMERIC_NEGATIVE_1_BYTE_INT - tag + 1)
            }
            NUMERIC_NEGATIVE_SMALL_MAGNITUDE => NegativeSmallMagnitude,
            NUMERIC_ZERO => Zero,
            NUMERIC_POSITIVE_SMALL_MAGNITUDE => PositiveSmallMagnitude,
            NUMERIC_POSITIVE_1_BYTE_INT..=NUMERIC_POSITIVE_8_BYTE_INT => {
                PositiveInt(tag - NUMERIC_POSITIVE_1_BYTE_INT + 1)
            }
            NUMERIC_POSITIVE_LARGE_MAGNITUDE => PositiveLargeMagnitude,
            _ => return None,
        };
        Some(kind)
    }

    /// The value-less sentinels this decoder does not materialize.
    pub fn gap(self) -> Option<NumericGap> {
        use NumericTag::*;
        match self {
            NaN => Some(NumericGap::NaN),
            NegativeLargeMagnitude | PositiveLargeMagnitude => Some(NumericGap::LargeMagnitude),
            NegativeSmallMagnitude | PositiveSmallMagnitude => Some(NumericGap::SmallMagnitude),
            NegativeInt(_) | Zero | PositiveInt(_) => None,
        }
    }
}

/// Number of magnitude bytes following an integer-range tag, with its sign.
///
/// Returns `None` for every tag outside `32..=39` and `43..=50`.
///
/// # Example
///
/// ```
/// use keystring::encoding::numeric::{byte_count, Sign};
///
/// assert_eq!(byte_count(43), Some((Sign::Positive, 1)));
/// assert_eq!(byte_count(32), Some((Sign::Negative, 8)));
/// assert_eq!(byte_count(41), None);
/// ```
pub fn byte_count(tag: u8) -> Option<(Sign, u8)> {
    match NumericTag::from_byte(tag)? {
        NumericTag::NegativeInt(n) => Some((Sign::Negative, n)),
        NumericTag::PositiveInt(n) => Some((Sign::Positive, n)),
        _ => None,
    }
}

/// An integer decoded from an integer-range tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Integer {
    /// The value had no fractional part.
    Exact(i64),
    /// The fractional-part flag was set; the integer bytes alone cannot rebuild it.
    Fractional,
}

/// Reads `len` magnitude bytes and applies the sign.
///
/// The bytes are accumulated most significant first, after complementing each
/// one when `sign` is negative. The low bit of the result is the fractional-part
/// flag and the remaining bits are the magnitude.
pub fn read_integer(cursor: &mut ByteCursor, sign: Sign, len: u8) -> Result<Integer> {
    let mut encoded = 0u64;
    for _ in 0..len {
        let byte = match sign {
            Sign::Positive => cursor.read_byte()?,
            Sign::Negative => !cursor.read_byte()?,
        };
        encoded = (encoded << 8) | u64::from(byte);
    }

    if encoded & 1 == 1 {
        return Ok(Integer::Fractional);
    }

    // at most 63 bits after the shift, so this never overflows
    let magnitude = (encoded >> 1) as i64;
    Ok(Integer::Exact(match sign {
        Sign::Positive => magnitude,
        Sign::Negative => -magnitude,
    }))
}
