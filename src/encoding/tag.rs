use super::constants::*;
use super::numeric::NumericTag;

/// KeyString type tags.
///
/// [`Tag::from_byte`] is the single table from tag bytes to kinds; every byte
/// that is not listed there is unsupported.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Ends the current object or array level.
    End,
    MinKey,
    Undefined,
    Null,
    /// Any number; see [`NumericTag`].
    Numeric(NumericTag),
    StringLike,
    Object,
    Array,
    BinData,
    ObjectId,
    Bool(bool),
    Date,
    Timestamp,
    Regex,
    DbRef,
    Code,
    CodeWithScope,
    MaxKey,
}

impl Tag {
    /// Looks up the kind of a tag byte.
    ///
    /// Sort-direction markers are not tags: they are stripped before lookup and
    /// map to `None` here, as do unassigned bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use keystring::encoding::Tag;
    ///
    /// assert_eq!(Tag::from_byte(110), Some(Tag::Bool(false)));
    /// assert_eq!(Tag::from_byte(0), Some(Tag::End));
    /// assert_eq!(Tag::from_byte(200), None);
    /// ```
    pub fn from_byte(byte: u8) -> Option<Tag> {
        use Tag::*;
        let tag = match byte {
            LEVEL_ZERO | END => End,
            MIN_KEY => MinKey,
            UNDEFINED => Undefined,
            NULLISH => Null,
            NUMERIC..=NUMERIC_POSITIVE_LARGE_MAGNITUDE => Numeric(NumericTag::from_byte(byte)?),
            STRING_LIKE => StringLike,
            OBJECT => Object,
            ARRAY => Array,
            BIN_DATA => BinData,
            OID => ObjectId,
            BOOL_FALSE => Bool(false),
            BOOL_TRUE => Bool(true),
            DATE => Date,
            TIMESTAMP => Timestamp,
            REGEX => Regex,
            DB_REF => DbRef,
            CODE => Code,
            CODE_WITH_SCOPE => CodeWithScope,
            MAX_KEY => MaxKey,
            _ => return None,
        };
        Some(tag)
    }

    /// Indicates whether `byte` is a sort-direction marker.
    pub fn is_marker(byte: u8) -> bool { byte == MARKER_LESS || byte == MARKER_GREATER }
}
