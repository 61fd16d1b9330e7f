pub use crate::{
    document::{Document, OrderedMap},
    encoding::{
        decode_array, decode_document, decode_one_value, ByteCursor, KeyString, KeyStringConfig,
        Version,
    },
    errors::{DecodeError, NumericGap},
    value::*,
};
pub use bytes::Bytes;
