//! # KeyString
//!
//! A decoder for MongoDB's KeyString format, the order-preserving binary encoding
//! MongoDB uses for index keys and change stream resume tokens.
//!
//! A KeyString compares correctly with a plain byte-wise comparison, which is what
//! makes it useful as an index key. The price is that it carries no schema: every value
//! starts with a type tag chosen so that the tags themselves sort in BSON type order.
//! This crate walks those tags and rebuilds a tree of [`Value`]s.
//!
//! # Usage
//!
//! Wrap the bytes (or their hex rendering) in a [`KeyString`], then pull values out
//! of it. A resume token, for instance, is a flat run of independently tagged fields
//! and is read with one [`KeyString::decode_one_value`] call per field.
//!
//! ```
//! use keystring::prelude::*;
//!
//! // a timestamp followed by the integer 1
//! let mut ks = KeyString::from_hex("82000000010000000a2b02").unwrap();
//!
//! let ts = ks.decode_one_value().unwrap();
//! assert_eq!(
//!     ts.as_timestamp(),
//!     Some(Timestamp {
//!         seconds: 1,
//!         increment: 10,
//!     })
//! );
//!
//! assert_eq!(ks.decode_one_value().unwrap(), Value::Integer(1));
//! assert!(ks.cursor().is_exhausted());
//! ```
//!
//! The same traversal is available as free functions over a [`ByteCursor`]:
//! [`decode_one_value`], [`decode_document`] and [`decode_array`].
//!
//! # An overview of decoded types
//!
//! ## Scalars
//!
//! Null (and undefined), booleans, integers, strings, ObjectIds, timestamps, dates,
//! binary data, regular expressions, code, DBPointers, and the MinKey/MaxKey bounds
//! each decode to their own [`Value`] variant.
//!
//! ## Numbers
//!
//! Only integers that fit in 63 bits of magnitude are materialized, as
//! [`Value::Integer`]. NaN, magnitudes of `2^63` and beyond, values strictly between `-1`
//! and `1`, and values with a fractional part are recognized and reported as
//! [`DecodeError::UnsupportedNumeric`], naming which case was hit.
//!
//! ## Documents and arrays
//!
//! Documents decode into a [`Document`], an insertion-ordered map in which a repeated
//! key keeps its first position and its last value. Arrays decode into a
//! `Vec<Value>`. Nesting is bounded by [`KeyStringConfig::max_depth`].
//!
//! # Format
//!
//! This section summarizes the parts of the KeyString format this crate reads.
//!
//! ## Tags
//!
//! Every value begins with a one-byte tag. A tag may be preceded by a sort-direction
//! marker, `1` (less) or `254` (greater), which is skipped.
//!
//! | Tag        | Type                                 |
//! | ---        | ---                                  |
//! | `0`, `4`   | end of the current document or array |
//! | `10`       | MinKey                               |
//! | `15`       | undefined                            |
//! | `20`       | null                                 |
//! | `30..=51`  | number                               |
//! | `60`       | string and symbol                    |
//! | `70`       | document                             |
//! | `80`       | array                                |
//! | `90`       | binary data                          |
//! | `100`      | ObjectId                             |
//! | `110, 111` | `false`, `true`                      |
//! | `120`      | date                                 |
//! | `130`      | timestamp                            |
//! | `140`      | regular expression                   |
//! | `150`      | DBPointer                            |
//! | `160`      | code                                 |
//! | `170`      | code with scope                      |
//! | `240`      | MaxKey                               |
//!
//! ## Numbers
//!
//! See [`encoding::numeric`] for the numeric tag layout. Integers are stored as
//! `(magnitude << 1) | has_fraction` in 1 to 8 big-endian bytes, complemented for
//! negative values.
//!
//! ## Strings
//!
//! Strings are NUL-terminated. An embedded NUL is written as `00 ff`, so a segment
//! terminator followed by `0xff` means another segment follows. Decoded strings show
//! embedded NULs as the escape [`NUL_ESCAPE`](encoding::NUL_ESCAPE).
//!
//! ## Documents
//!
//! A document is a sequence of fields ended by `0` or `4`. Each field is the type tag
//! of its value, the field name as a plain NUL-terminated string, and then the value
//! with its own tag.
//!
//! ## Fixed layouts
//!
//! | Type              | Payload                                                    |
//! | ---               | ---                                                        |
//! | binary data       | length (1 byte, or `0xff` and 4 bytes), subtype, bytes     |
//! | ObjectId          | 12 bytes                                                   |
//! | date              | 8 bytes, big-endian, sign bit flipped                      |
//! | timestamp         | seconds and increment, 4 bytes each, big-endian            |
//! | regular expression | pattern and flags, both NUL-terminated                    |
//! | DBPointer         | namespace length (4 bytes), namespace, 12-byte ObjectId    |
//! | code with scope   | code string, then a document body                          |

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod document;
pub mod encoding;
pub mod errors;
pub mod prelude;
mod util;
pub mod value;

pub use document::{Document, OrderedMap};
pub use encoding::{
    decode_array, decode_document, decode_one_value, ByteCursor, KeyString, KeyStringConfig,
    Version,
};
pub use errors::{DecodeError, NumericGap, Result};
pub use value::{Binary, CodeWithScope, DbRef, ObjectId, Regex, Timestamp, Value};
