/// Sort-direction marker, "less". Prefixes a real tag, carries no value.
pub(crate) const MARKER_LESS: u8 = 1;
/// Sort-direction marker, "greater".
pub(crate) const MARKER_GREATER: u8 = 254;

/// Literal zero, written by MongoDB at the end of every object and array level.
pub(crate) const LEVEL_ZERO: u8 = 0;
/// End-of-key tag, 0x04
pub(crate) const END: u8 = 4;

pub(crate) const MIN_KEY: u8 = 10;
pub(crate) const UNDEFINED: u8 = 15;
pub(crate) const NULLISH: u8 = 20;

/// First numeric tag, 0x1e
pub(crate) const NUMERIC: u8 = 30;
pub(crate) const NUMERIC_NAN: u8 = NUMERIC;
/// `<= -2^63`, including negative infinity
pub(crate) const NUMERIC_NEGATIVE_LARGE_MAGNITUDE: u8 = NUMERIC + 1;
pub(crate) const NUMERIC_NEGATIVE_8_BYTE_INT: u8 = NUMERIC + 2;
pub(crate) const NUMERIC_NEGATIVE_1_BYTE_INT: u8 = NUMERIC + 9;
/// Open interval `(-1, 0)`
pub(crate) const NUMERIC_NEGATIVE_SMALL_MAGNITUDE: u8 = NUMERIC + 10;
pub(crate) const NUMERIC_ZERO: u8 = NUMERIC + 11;
/// Open interval `(0, 1)`
pub(crate) const NUMERIC_POSITIVE_SMALL_MAGNITUDE: u8 = NUMERIC + 12;
pub(crate) const NUMERIC_POSITIVE_1_BYTE_INT: u8 = NUMERIC + 13;
pub(crate) const NUMERIC_POSITIVE_8_BYTE_INT: u8 = NUMERIC + 20;
/// `>= 2^63`, including positive infinity
pub(crate) const NUMERIC_POSITIVE_LARGE_MAGNITUDE: u8 = NUMERIC + 21;

pub(crate) const STRING_LIKE: u8 = 60;
pub(crate) const OBJECT: u8 = 70;
pub(crate) const ARRAY: u8 = 80;
pub(crate) const BIN_DATA: u8 = 90;
pub(crate) const OID: u8 = 100;
pub(crate) const BOOL_FALSE: u8 = 110;
pub(crate) const BOOL_TRUE: u8 = 111;
pub(crate) const DATE: u8 = 120;
pub(crate) const TIMESTAMP: u8 = 130;
pub(crate) const REGEX: u8 = 140;
pub(crate) const DB_REF: u8 = 150;
pub(crate) const CODE: u8 = 160;
pub(crate) const CODE_WITH_SCOPE: u8 = 170;
pub(crate) const MAX_KEY: u8 = 240;

/// Follows a string segment when the original string had a NUL at that point.
pub(crate) const NUL_CONTINUATION: u8 = 0xff;
/// BinData lengths of 255 and above are written as this byte and a 4-byte length.
pub(crate) const BIN_DATA_LONG_LENGTH: u8 = 0xff;

pub(crate) const OBJECT_ID_LEN: usize = 12;
/// Flips the sign bit of an encoded date so that negative dates sort first.
pub(crate) const DATE_SIGN_BIT: u64 = 1 << 63;
