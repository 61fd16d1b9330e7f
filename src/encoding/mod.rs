//! # KeyString decoder
//!
//! Entry points for decoding KeyString bytes into [`Value`]s.
//!
//! A KeyString is usually a flat run of independently tagged values, so the common
//! way in is to pull values one at a time from a single cursor.
//!
//! # Example
//!
//! ```
//! use keystring::prelude::*;
//!
//! // three values back-to-back: true, 5, "hi"
//! let mut ks = KeyString::from_hex("6f2b0a3c686900").unwrap();
//!
//! assert_eq!(ks.decode_one_value().unwrap(), Value::Bool(true));
//! assert_eq!(ks.decode_one_value().unwrap(), Value::Integer(5));
//! assert_eq!(ks.decode_one_value().unwrap(), Value::from("hi"));
//! assert!(ks.cursor().is_exhausted());
//! ```

use crate::{document::Document, errors::Result, value::Value};
use bytes::Bytes;

pub mod numeric;
pub mod tag;
pub use tag::Tag;
mod constants;
mod cursor;
pub use cursor::{ByteCursor, NUL_ESCAPE};
mod de;
pub use de::Decoder;

/// Nesting limit used unless configured otherwise; matches MongoDB's BSON depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Declared KeyString format version.
///
/// Both versions share the layouts this crate reads, so the version is carried for
/// diagnostics only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    /// The original format.
    V0,
    /// The current format, and the default.
    V1,
}

impl Default for Version {
    fn default() -> Self { Version::V1 }
}

/// Decoder settings.
///
/// # Example
///
/// ```
/// use keystring::prelude::*;
///
/// let config = KeyStringConfig::default().version(Version::V0).max_depth(16);
///
/// assert_eq!(config.version, Version::V0);
/// assert_eq!(config.max_depth, 16);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyStringConfig {
    pub version: Version,
    /// Deepest document/array nesting accepted.
    pub max_depth: usize,
}

impl Default for KeyStringConfig {
    fn default() -> Self {
        KeyStringConfig {
            version: Version::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl KeyStringConfig {
    /// Sets the declared format version.
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Sets the deepest document/array nesting accepted.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A cursor over KeyString bytes together with its decoder settings.
#[derive(Clone, Debug)]
pub struct KeyString {
    cursor: ByteCursor,
    config: KeyStringConfig,
}

impl KeyString {
    /// Wraps `data` with the default configuration.
    pub fn new<B: Into<Bytes>>(data: B) -> Self { Self::with_config(data, KeyStringConfig::default()) }

    /// Wraps `data` with `config`.
    pub fn with_config<B: Into<Bytes>>(data: B, config: KeyStringConfig) -> Self {
        KeyString {
            cursor: ByteCursor::new(data),
            config,
        }
    }

    /// Decodes a hex string, see [`ByteCursor::from_hex`].
    pub fn from_hex(hex: &str) -> Result<Self> {
        Ok(KeyString {
            cursor: ByteCursor::from_hex(hex)?,
            config: KeyStringConfig::default(),
        })
    }

    /// Replaces the configuration, keeping the read position.
    pub fn config(mut self, config: KeyStringConfig) -> Self {
        self.config = config;
        self
    }

    /// Declared format version.
    pub fn version(&self) -> Version { self.config.version }

    /// The underlying cursor, for inspecting position and remaining bytes.
    pub fn cursor(&self) -> &ByteCursor { &self.cursor }

    fn decoder(&mut self) -> Decoder { Decoder::new(&mut self.cursor, self.config) }

    /// Reads exactly one tag and its value.
    pub fn decode_one_value(&mut self) -> Result<Value> { self.decoder().decode_one_value() }

    /// Reads document fields through the level terminator.
    pub fn decode_document(&mut self) -> Result<Document> { self.decoder().decode_document() }

    /// Reads array elements through the level terminator.
    pub fn decode_array(&mut self) -> Result<Vec<Value>> { self.decoder().decode_array() }

    /// Iterates over the values left in the buffer, one
    /// [`decode_one_value`](KeyString::decode_one_value) per item.
    ///
    /// The iterator ends when the cursor is exhausted, or right after yielding the
    /// first error.
    ///
    /// # Example
    ///
    /// ```
    /// use keystring::prelude::*;
    ///
    /// let mut ks = KeyString::from_hex("6e6f29").unwrap();
    /// let values: Vec<Value> = ks.values().collect::<Result<_, _>>().unwrap();
    ///
    /// assert_eq!(
    ///     values,
    ///     vec![Value::Bool(false), Value::Bool(true), Value::Integer(0)]
    /// );
    /// ```
    pub fn values(&mut self) -> Values { Values { ks: self, done: false } }
}

/// Iterator returned by [`KeyString::values`].
#[derive(Debug)]
pub struct Values<'a> {
    ks: &'a mut KeyString,
    done: bool,
}

impl<'a> Iterator for Values<'a> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Result<Value>> {
        if self.done || self.ks.cursor.is_exhausted() {
            return None;
        }
        let item = self.ks.decode_one_value();
        self.done = item.is_err();
        Some(item)
    }
}

/// Reads exactly one tag and its value from `cursor` with the default configuration.
///
/// Call repeatedly on the same cursor to walk a flat sequence of values.
///
/// # Example
///
/// ```
/// use keystring::prelude::*;
///
/// let cursor = &mut ByteCursor::from_hex("1414").unwrap();
///
/// assert_eq!(decode_one_value(cursor).unwrap(), Value::Null);
/// assert_eq!(decode_one_value(cursor).unwrap(), Value::Null);
/// ```
pub fn decode_one_value(cursor: &mut ByteCursor) -> Result<Value> {
    Decoder::new(cursor, KeyStringConfig::default()).decode_one_value()
}

/// Reads document fields from `cursor` through the level terminator.
pub fn decode_document(cursor: &mut ByteCursor) -> Result<Document> {
    Decoder::new(cursor, KeyStringConfig::default()).decode_document()
}

/// Reads array elements from `cursor` through the level terminator.
pub fn decode_array(cursor: &mut ByteCursor) -> Result<Vec<Value>> {
    Decoder::new(cursor, KeyStringConfig::default()).decode_array()
}
