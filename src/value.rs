//! Decoded KeyString values.

use crate::document::Document;
use bytes::Bytes;
use std::fmt;

/// A 12-byte MongoDB ObjectId.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ObjectId(pub [u8; 12]);

impl ObjectId {
    /// Raw bytes.
    pub fn bytes(&self) -> &[u8; 12] { &self.0 }

    /// Lowercase hex rendering, as printed by the mongo shell.
    pub fn to_hex(&self) -> String { hex::encode(self.0) }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "ObjectId(\"{}\")", self.to_hex()) }
}

/// A BSON timestamp: seconds since the epoch and an ordinal within that second.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Timestamp {
    pub seconds: u32,
    pub increment: u32,
}

/// Binary data with its BSON subtype.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Binary {
    pub subtype: u8,
    pub bytes: Bytes,
}

/// A regular expression, stored as pattern and flags.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Regex {
    pub pattern: String,
    pub flags: String,
}

/// A DBPointer: a namespace and an ObjectId.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DbRef {
    pub namespace: String,
    pub id: ObjectId,
}

/// JavaScript code with its scope document.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CodeWithScope {
    pub code: String,
    pub scope: Document,
}

#[derive(Eq, PartialEq, Clone, Hash, Debug)]
/// [`Value`] and its variants.
///
/// # Example
///
/// ```
/// use keystring::prelude::*;
///
/// let v = Value::Integer(7);
///
/// match v {
///     Value::Integer(n) => assert_eq!(n, 7),
///     _ => panic!(),
/// }
/// ```
pub enum Value {
    /// Null. Undefined also decodes to this.
    Null,
    Bool(bool),
    /// An integer with no fractional part.
    Integer(i64),
    /// A string. Embedded NULs appear as the two-character escape `\0`.
    String(String),
    Document(Document),
    Array(Vec<Value>),
    ObjectId(ObjectId),
    Timestamp(Timestamp),
    Binary(Binary),
    MinKey,
    MaxKey,
    /// Milliseconds since the Unix epoch.
    Date(i64),
    Regex(Regex),
    Code(String),
    CodeWithScope(CodeWithScope),
    DbRef(DbRef),
}

impl Value {
    /// Indicates whether a value is [`Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use keystring::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            _ => false,
        }
    }

    /// Returns the boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is a [`Value::Integer`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string, if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the document, if this is a [`Value::Document`].
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the elements, if this is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the timestamp, if this is a [`Value::Timestamp`].
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Returns the binary data, if this is a [`Value::Binary`].
    pub fn as_binary(&self) -> Option<&Binary> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Document(_) => "document",
            Value::Array(_) => "array",
            Value::ObjectId(_) => "objectId",
            Value::Timestamp(_) => "timestamp",
            Value::Binary(_) => "binData",
            Value::MinKey => "minKey",
            Value::MaxKey => "maxKey",
            Value::Date(_) => "date",
            Value::Regex(_) => "regex",
            Value::Code(_) => "code",
            Value::CodeWithScope(_) => "codeWithScope",
            Value::DbRef(_) => "dbPointer",
        }
    }
}

fn fmt_str(s: &str) -> String { format!("{:?}", s) }

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn fmt_doc(d: &Document, indent: usize) -> String {
            if d.is_empty() {
                return "{}".to_owned();
            }
            let mut doc_string: String = "{".to_owned();
            for (i, (k, v)) in d.iter().enumerate() {
                if i != 0 {
                    doc_string.push(',');
                }
                doc_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                doc_string.push_str(&format!(
                    "{key}: {value}",
                    key = fmt_str(k),
                    value = fmt_helper(v, indent + 2),
                ));
            }
            doc_string.push_str(&format!("\n{:indent$}}}", "", indent = indent));

            doc_string
        }

        fn fmt_helper(v: &Value, indent: usize) -> String {
            match v {
                Value::Null => "null".to_owned(),
                Value::Bool(b) => b.to_string(),
                Value::Integer(i) => i.to_string(),
                Value::String(s) => fmt_str(s),
                Value::Document(d) => fmt_doc(d, indent),
                Value::Array(a) => {
                    let items: Vec<String> =
                        a.iter().map(|v| fmt_helper(v, indent)).collect();
                    format!("[{}]", items.join(", "))
                }
                Value::ObjectId(oid) => oid.to_string(),
                Value::Timestamp(ts) => format!("Timestamp({}, {})", ts.seconds, ts.increment),
                Value::Binary(b) => format!("BinData({}, {})", b.subtype, hex::encode(&b.bytes)),
                Value::MinKey => "MinKey".to_owned(),
                Value::MaxKey => "MaxKey".to_owned(),
                Value::Date(ms) => format!("Date({})", ms),
                Value::Regex(re) => format!("/{}/{}", re.pattern, re.flags),
                Value::Code(code) => format!("Code({})", fmt_str(code)),
                Value::CodeWithScope(cws) => format!(
                    "Code({}, {})",
                    fmt_str(&cws.code),
                    fmt_doc(&cws.scope, indent)
                ),
                Value::DbRef(r) => format!("DBPointer({}, {})", fmt_str(&r.namespace), r.id),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

crate::from_fn!(Value, bool, Value::Bool);
crate::from_fn!(Value, i64, Value::Integer);
crate::from_fn!(Value, String, Value::String);
crate::from_fn!(Value, &str, |s: &str| Value::String(s.to_owned()));
crate::from_fn!(Value, Document, Value::Document);
crate::from_fn!(Value, Vec<Value>, Value::Array);
crate::from_fn!(Value, ObjectId, Value::ObjectId);
crate::from_fn!(Value, Timestamp, Value::Timestamp);
crate::from_fn!(Value, Binary, Value::Binary);
