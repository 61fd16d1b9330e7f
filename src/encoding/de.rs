use super::constants::*;
use super::cursor::ByteCursor;
use super::numeric::{self, Integer, NumericTag, Sign};
use super::tag::Tag;
use super::{KeyStringConfig, Version};
use crate::document::Document;
use crate::errors::{DecodeError, NumericGap, Result};
use crate::value::{Binary, CodeWithScope, DbRef, ObjectId, Regex, Timestamp, Value};
use tracing::{debug, trace};

/// Walks a [`ByteCursor`], turning tags and their payloads into [`Value`]s.
///
/// A decoder borrows its cursor mutably, so each cursor has exactly one reader at a
/// time. A failed call leaves the cursor wherever the failing read stopped.
#[derive(Debug)]
pub struct Decoder<'c> {
    cursor: &'c mut ByteCursor,
    config: KeyStringConfig,
    depth: usize,
}

impl<'c> Decoder<'c> {
    /// Creates a decoder reading from the current position of `cursor`.
    pub fn new(cursor: &'c mut ByteCursor, config: KeyStringConfig) -> Self {
        Decoder {
            cursor,
            config,
            depth: 0,
        }
    }

    /// Declared format version of the bytes being decoded.
    pub fn version(&self) -> Version { self.config.version }

    /// The cursor being read.
    pub fn cursor(&self) -> &ByteCursor { &*self.cursor }

    /// Reads one tag byte, skipping a sort-direction marker if one precedes it.
    ///
    /// Returns the tag byte and the offset it was read from.
    pub fn read_tag(&mut self) -> Result<(u8, usize)> {
        let mut position = self.cursor.position();
        let mut byte = self.cursor.read_byte()?;
        if Tag::is_marker(byte) {
            position = self.cursor.position();
            byte = self.cursor.read_byte()?;
        }
        Ok((byte, position))
    }

    /// Reads exactly one tag and the value it introduces.
    pub fn decode_one_value(&mut self) -> Result<Value> {
        let (tag, position) = self.read_tag()?;
        self.decode_value(tag, position)
    }

    /// Decodes the value introduced by `tag`, which was read at `position`.
    pub fn decode_value(&mut self, tag: u8, position: usize) -> Result<Value> {
        trace!(
            tag = tag,
            position = position,
            version = ?self.config.version,
            "decoding value"
        );

        let kind = match Tag::from_byte(tag) {
            Some(kind) => kind,
            None => {
                debug!(tag = tag, position = position, "unsupported tag");
                return Err(DecodeError::UnsupportedTag { tag, position });
            }
        };

        match kind {
            Tag::End => Err(DecodeError::UnexpectedTerminator { position }),
            Tag::MinKey => Ok(Value::MinKey),
            Tag::MaxKey => Ok(Value::MaxKey),
            Tag::Undefined | Tag::Null => Ok(Value::Null),
            Tag::Bool(b) => Ok(Value::Bool(b)),
            Tag::Numeric(kind) => self.read_numeric(tag, kind, position),
            Tag::StringLike => Ok(Value::String(self.cursor.read_cstring_with_nulls()?)),
            Tag::Code => Ok(Value::Code(self.cursor.read_cstring_with_nulls()?)),
            Tag::Object => Ok(Value::Document(self.decode_document()?)),
            Tag::Array => Ok(Value::Array(self.decode_array()?)),
            Tag::BinData => Ok(Value::Binary(self.read_bin_data()?)),
            Tag::ObjectId => Ok(Value::ObjectId(self.read_object_id()?)),
            Tag::Date => Ok(Value::Date(self.read_date()?)),
            Tag::Timestamp => Ok(Value::Timestamp(self.read_timestamp()?)),
            Tag::Regex => Ok(Value::Regex(self.read_regex()?)),
            Tag::DbRef => Ok(Value::DbRef(self.read_db_ref()?)),
            Tag::CodeWithScope => Ok(Value::CodeWithScope(self.read_code_with_scope()?)),
        }
    }

    /// Decodes document fields up to and including the level terminator.
    ///
    /// Each field is its type tag, a NUL-terminated name, and then the value with
    /// its own tag. Names never use the `0xff` continuation.
    pub fn decode_document(&mut self) -> Result<Document> {
        self.enter()?;
        let mut doc = Document::new();
        loop {
            let (tag, _) = self.read_tag()?;
            if let Some(Tag::End) = Tag::from_byte(tag) {
                break;
            }
            let name = self.cursor.read_cstring()?;
            let value = self.decode_one_value()?;
            doc.insert(name, value);
        }
        self.leave();
        Ok(doc)
    }

    /// Decodes array elements up to and including the level terminator.
    pub fn decode_array(&mut self) -> Result<Vec<Value>> {
        self.enter()?;
        let mut items = Vec::new();
        loop {
            let (tag, position) = self.read_tag()?;
            if let Some(Tag::End) = Tag::from_byte(tag) {
                break;
            }
            items.push(self.decode_value(tag, position)?);
        }
        self.leave();
        Ok(items)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) { self.depth -= 1; }

    fn read_numeric(&mut self, tag: u8, kind: NumericTag, position: usize) -> Result<Value> {
        let unsupported = |gap: NumericGap| {
            debug!(tag = tag, position = position, gap = %gap, "numeric value not materialized");
            DecodeError::UnsupportedNumeric { tag, gap, position }
        };

        if let Some(gap) = kind.gap() {
            return Err(unsupported(gap));
        }

        let (sign, len) = match kind {
            NumericTag::Zero => return Ok(Value::Integer(0)),
            NumericTag::PositiveInt(len) => (Sign::Positive, len),
            NumericTag::NegativeInt(len) => (Sign::Negative, len),
            _ => return Err(DecodeError::UnsupportedTag { tag, position }),
        };

        match numeric::read_integer(self.cursor, sign, len)? {
            Integer::Exact(n) => Ok(Value::Integer(n)),
            Integer::Fractional => Err(unsupported(NumericGap::FractionalPart)),
        }
    }

    /// Length is one byte, or `0xff` followed by a big-endian `u32` for long
    /// payloads; then the subtype byte and the payload itself.
    fn read_bin_data(&mut self) -> Result<Binary> {
        let len = match self.cursor.read_byte()? {
            BIN_DATA_LONG_LENGTH => self.cursor.read_u32_be()? as usize,
            short => short as usize,
        };
        let subtype = self.cursor.read_byte()?;
        let bytes = self.cursor.read_bytes(len)?;
        Ok(Binary { subtype, bytes })
    }

    fn read_object_id(&mut self) -> Result<ObjectId> {
        let bytes = self.cursor.read_bytes(OBJECT_ID_LEN)?;
        let mut oid = [0u8; OBJECT_ID_LEN];
        oid.copy_from_slice(&bytes);
        Ok(ObjectId(oid))
    }

    fn read_timestamp(&mut self) -> Result<Timestamp> {
        let seconds = self.cursor.read_u32_be()?;
        let increment = self.cursor.read_u32_be()?;
        Ok(Timestamp { seconds, increment })
    }

    fn read_date(&mut self) -> Result<i64> {
        let encoded = self.cursor.read_u64_be()?;
        Ok((encoded ^ DATE_SIGN_BIT) as i64)
    }

    fn read_regex(&mut self) -> Result<Regex> {
        let pattern = self.cursor.read_cstring()?;
        let flags = self.cursor.read_cstring()?;
        Ok(Regex { pattern, flags })
    }

    fn read_db_ref(&mut self) -> Result<DbRef> {
        let len = self.cursor.read_u32_be()? as usize;
        let start = self.cursor.position();
        let ns = self.cursor.read_bytes(len)?;
        let namespace =
            String::from_utf8(ns.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { position: start })?;
        let id = self.read_object_id()?;
        Ok(DbRef { namespace, id })
    }

    fn read_code_with_scope(&mut self) -> Result<CodeWithScope> {
        let code = self.cursor.read_cstring_with_nulls()?;
        let scope = self.decode_document()?;
        Ok(CodeWithScope { code, scope })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(bytes: &[u8]) -> Result<Value> {
        let cursor = &mut ByteCursor::new(bytes);
        Decoder::new(cursor, KeyStringConfig::default()).decode_one_value()
    }

    #[test]
    fn tag_only_values() {
        assert_eq!(decode(&[NULLISH, END]).unwrap(), Value::Null);
        assert_eq!(decode(&[UNDEFINED, END]).unwrap(), Value::Null);
        assert_eq!(decode(&[BOOL_TRUE]).unwrap(), Value::Bool(true));
        assert_eq!(decode(&[BOOL_FALSE]).unwrap(), Value::Bool(false));
        assert_eq!(decode(&[MIN_KEY]).unwrap(), Value::MinKey);
        assert_eq!(decode(&[MAX_KEY]).unwrap(), Value::MaxKey);
        assert_eq!(decode(&[NUMERIC_ZERO]).unwrap(), Value::Integer(0));
    }

    #[test]
    fn markers_are_skipped() {
        assert_eq!(decode(&[MARKER_LESS, BOOL_TRUE]).unwrap(), Value::Bool(true));
        assert_eq!(
            decode(&[MARKER_GREATER, NUMERIC_POSITIVE_1_BYTE_INT, 0x54]).unwrap(),
            Value::Integer(42)
        );
    }

    #[test]
    fn unknown_tags_are_errors() {
        assert_eq!(
            decode(&[200]).unwrap_err(),
            DecodeError::UnsupportedTag {
                tag: 200,
                position: 0
            }
        );
        assert_eq!(
            decode(&[MARKER_LESS, 7]).unwrap_err(),
            DecodeError::UnsupportedTag {
                tag: 7,
                position: 1
            }
        );
        assert_eq!(
            decode(&[END]).unwrap_err(),
            DecodeError::UnexpectedTerminator { position: 0 }
        );
    }

    #[test]
    fn numeric_gaps() {
        for &(tag, gap) in &[
            (NUMERIC_NAN, NumericGap::NaN),
            (NUMERIC_NEGATIVE_LARGE_MAGNITUDE, NumericGap::LargeMagnitude),
            (NUMERIC_POSITIVE_LARGE_MAGNITUDE, NumericGap::LargeMagnitude),
            (NUMERIC_NEGATIVE_SMALL_MAGNITUDE, NumericGap::SmallMagnitude),
            (NUMERIC_POSITIVE_SMALL_MAGNITUDE, NumericGap::SmallMagnitude),
        ] {
            assert_eq!(
                decode(&[tag, 0, 0]).unwrap_err(),
                DecodeError::UnsupportedNumeric {
                    tag,
                    gap,
                    position: 0
                }
            );
        }

        assert_eq!(
            decode(&[NUMERIC_POSITIVE_1_BYTE_INT, 0x55]).unwrap_err(),
            DecodeError::UnsupportedNumeric {
                tag: NUMERIC_POSITIVE_1_BYTE_INT,
                gap: NumericGap::FractionalPart,
                position: 0
            }
        );
    }

    #[test]
    fn negative_integers() {
        // -1000: magnitude 2000 = 0x07d0, complemented
        assert_eq!(
            decode(&[NUMERIC_NEGATIVE_1_BYTE_INT - 1, 0xf8, 0x2f]).unwrap(),
            Value::Integer(-1000)
        );
    }

    #[test]
    fn strings_and_code() {
        assert_eq!(
            decode(b"\x3chello\x00\x04").unwrap(),
            Value::String("hello".to_owned())
        );
        assert_eq!(
            decode(b"\x3ca\x00\xffb\x00").unwrap(),
            Value::String("a\\0b".to_owned())
        );
        assert_eq!(
            decode(b"\xa0return 1\x00").unwrap(),
            Value::Code("return 1".to_owned())
        );
    }

    #[test]
    fn bin_data_short() {
        let value = decode(&[BIN_DATA, 3, 0, 1, 2, 3, END]).unwrap();
        assert_eq!(
            value,
            Value::Binary(Binary {
                subtype: 0,
                bytes: bytes::Bytes::from(vec![1, 2, 3]),
            })
        );
    }

    #[test]
    fn bin_data_long() {
        let mut bytes = vec![BIN_DATA, 0xff, 0, 0, 1, 0, 5];
        bytes.extend(std::iter::repeat(0xab).take(256));
        bytes.push(END);

        let cursor = &mut ByteCursor::new(bytes);
        let value = Decoder::new(cursor, KeyStringConfig::default())
            .decode_one_value()
            .unwrap();
        let bin = value.as_binary().unwrap();
        assert_eq!(bin.subtype, 5);
        assert_eq!(bin.bytes.len(), 256);
        assert!(bin.bytes.iter().all(|&b| b == 0xab));
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn bin_data_with_maximal_length_is_truncated() {
        let err = decode(&[BIN_DATA, 0xff, 0xff, 0xff, 0xff, 0xff, 0, 1, 2, END]).unwrap_err();
        assert!(err.is_truncation());

        let err = decode(&[DB_REF, 0xff, 0xff, 0xff, 0xff, b'x', END]).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn object_id_and_timestamp() {
        let mut bytes = vec![OID];
        bytes.extend(1..=12u8);
        bytes.push(END);
        assert_eq!(
            decode(&bytes).unwrap(),
            Value::ObjectId(ObjectId([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]))
        );

        assert_eq!(
            decode(&[TIMESTAMP, 0x5f, 0, 0, 1, 0, 0, 0, 7]).unwrap(),
            Value::Timestamp(Timestamp {
                seconds: 0x5f00_0001,
                increment: 7,
            })
        );
    }

    #[test]
    fn dates() {
        // 0 ms is stored as 2^63
        assert_eq!(
            decode(&[DATE, 0x80, 0, 0, 0, 0, 0, 0, 0]).unwrap(),
            Value::Date(0)
        );
        // -1 ms
        assert_eq!(
            decode(&[DATE, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]).unwrap(),
            Value::Date(-1)
        );
        assert_eq!(
            decode(&[DATE, 0x80, 0, 0, 0, 0, 0, 0x03, 0xe8]).unwrap(),
            Value::Date(1000)
        );
    }

    #[test]
    fn regex_and_db_ref() {
        assert_eq!(
            decode(b"\x8c^a.*\x00i\x00").unwrap(),
            Value::Regex(Regex {
                pattern: "^a.*".to_owned(),
                flags: "i".to_owned(),
            })
        );

        let mut bytes = vec![DB_REF, 0, 0, 0, 4];
        bytes.extend_from_slice(b"db.c");
        bytes.extend(std::iter::repeat(0x11).take(12));
        bytes.push(END);
        assert_eq!(
            decode(&bytes).unwrap(),
            Value::DbRef(DbRef {
                namespace: "db.c".to_owned(),
                id: ObjectId([0x11; 12]),
            })
        );
    }

    #[test]
    fn code_with_scope() {
        let bytes = b"\xaaf()\x00\x2bx\x00\x2b\x02\x00";
        let value = decode(bytes).unwrap();

        let mut scope = Document::new();
        scope.insert("x".to_owned(), Value::Integer(1));
        assert_eq!(
            value,
            Value::CodeWithScope(CodeWithScope {
                code: "f()".to_owned(),
                scope,
            })
        );
    }

    #[test]
    fn nested_document() {
        // { a: 1, b: [true, "s"] }
        let bytes = b"\x46\x2ba\x00\x2b\x02\x50b\x00\x50\x6f\x3cs\x00\x00\x00\x04";
        let cursor = &mut ByteCursor::new(&bytes[..]);
        let value = Decoder::new(cursor, KeyStringConfig::default())
            .decode_one_value()
            .unwrap();

        let doc = value.as_document().unwrap();
        assert_eq!(doc.get("a"), Some(&Value::Integer(1)));
        assert_eq!(
            doc.get("b"),
            Some(&Value::Array(vec![
                Value::Bool(true),
                Value::String("s".to_owned())
            ]))
        );
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.peek(), Some(END));
    }

    #[test]
    fn duplicate_fields_keep_the_last_value() {
        let bytes = b"\x46\x2bk\x00\x2b\x02\x2bk\x00\x2b\x04\x00";
        let doc = decode(bytes).unwrap();
        let doc = doc.as_document().unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("k"), Some(&Value::Integer(2)));
    }

    #[test]
    fn depth_limit() {
        let mut bytes = vec![ARRAY; 4];
        bytes.extend(vec![LEVEL_ZERO; 4]);

        let config = KeyStringConfig::default().max_depth(3);
        let cursor = &mut ByteCursor::new(bytes.clone());
        assert_eq!(
            Decoder::new(cursor, config).decode_one_value().unwrap_err(),
            DecodeError::DepthLimitExceeded { limit: 3 }
        );

        let config = KeyStringConfig::default().max_depth(4);
        let cursor = &mut ByteCursor::new(bytes);
        let value = Decoder::new(cursor, config).decode_one_value().unwrap();
        assert_eq!(
            value,
            Value::Array(vec![Value::Array(vec![Value::Array(vec![Value::Array(
                vec![]
            )])])])
        );
    }

    #[test]
    fn truncated_document_is_an_error() {
        let bytes = b"\x46\x2ba\x00\x2c";
        assert!(decode(bytes).unwrap_err().is_truncation());
    }
}
