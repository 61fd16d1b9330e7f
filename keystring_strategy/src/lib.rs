//! Proptest strategies producing KeyString bytes together with what they should
//! decode to.

use proptest::prelude::*;

const NULL: u8 = 20;
const NUMERIC_ZERO: u8 = 41;
const NEGATIVE_1_BYTE_INT: u8 = 39;
const POSITIVE_1_BYTE_INT: u8 = 43;
const STRING_LIKE: u8 = 60;
const OBJECT: u8 = 70;
const ARRAY: u8 = 80;
const BIN_DATA: u8 = 90;
const BOOL_FALSE: u8 = 110;
const BOOL_TRUE: u8 = 111;
const TIMESTAMP: u8 = 130;
const LEVEL_END: u8 = 0;

/// Encodes an integer the way MongoDB writes an exact 64-bit integer: the tag, then
/// `magnitude << 1` in as few big-endian bytes as it fits.
///
/// `i64::min_value()` has no exact encoding here and panics.
pub fn encode_int(n: i64, out: &mut Vec<u8>) {
    if n == 0 {
        out.push(NUMERIC_ZERO);
        return;
    }
    assert!(n != i64::min_value(), "magnitude does not fit in 63 bits");

    let encoded = (n.abs() as u64) << 1;
    let len = 8 - (encoded.leading_zeros() / 8) as u8;
    let bytes = &encoded.to_be_bytes()[8 - len as usize..];

    if n > 0 {
        out.push(POSITIVE_1_BYTE_INT + len - 1);
        out.extend_from_slice(bytes);
    } else {
        out.push(NEGATIVE_1_BYTE_INT - len + 1);
        out.extend(bytes.iter().map(|b| !b));
    }
}

/// arbitrary exactly-representable integer, as `(bytes, value)`
pub fn arb_encoded_int() -> impl Strategy<Value = (Vec<u8>, i64)> {
    prop_oneof![
        // spread over every byte width, not just the widest
        (0u32..63, any::<u64>(), any::<bool>()).prop_map(|(bits, raw, neg)| {
            let magnitude = (raw >> (63 - bits)) as i64 >> 1;
            if neg {
                -magnitude
            } else {
                magnitude
            }
        }),
        (i64::min_value() + 1)..=i64::max_value(),
    ]
    .prop_map(|n| {
        let mut out = Vec::new();
        encode_int(n, &mut out);
        (out, n)
    })
}

/// arbitrary magnitude with its byte width, as `(magnitude bytes, magnitude)`
///
/// The bytes are `magnitude << 1` in big-endian order, 1 to 8 of them.
pub fn arb_magnitude() -> impl Strategy<Value = (Vec<u8>, i64)> {
    (1u8..=8, any::<u64>()).prop_map(|(len, raw)| {
        let bits = u32::from(len) * 8;
        let encoded = if bits == 64 {
            raw & !1
        } else {
            (raw & ((1u64 << bits) - 1)) & !1
        };
        let bytes = encoded.to_be_bytes()[8 - len as usize..].to_vec();
        (bytes, (encoded >> 1) as i64)
    })
}

/// arbitrary string with embedded NULs, as `(segment bytes, expected string)`
///
/// The bytes start right after the string tag. Decoders render each embedded NUL as
/// the two characters `\0`.
pub fn arb_nul_string() -> impl Strategy<Value = (Vec<u8>, String)> {
    prop::collection::vec("[^\\x00]{0,8}", 1..5).prop_map(|segments| {
        let mut out = Vec::new();
        for (i, seg) in segments.iter().enumerate() {
            if i != 0 {
                out.push(0xff);
            }
            out.extend_from_slice(seg.as_bytes());
            out.push(0);
        }
        (out, segments.join("\\0"))
    })
}

/// arbitrary BinData, as `(bytes, subtype, payload)`
///
/// Payloads of 255 bytes and more use the `0xff` long-length escape.
pub fn arb_bin_data() -> impl Strategy<Value = (Vec<u8>, u8, Vec<u8>)> {
    (
        any::<u8>(),
        prop_oneof![
            prop::collection::vec(any::<u8>(), 0..255),
            prop::collection::vec(any::<u8>(), 255..600),
        ],
    )
        .prop_map(|(subtype, payload)| {
            let mut out = vec![BIN_DATA];
            if payload.len() < 255 {
                out.push(payload.len() as u8);
            } else {
                out.push(0xff);
                out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            }
            out.push(subtype);
            out.extend_from_slice(&payload);
            (out, subtype, payload)
        })
}

/// arbitrary Timestamp, as `(bytes, seconds, increment)`
pub fn arb_timestamp() -> impl Strategy<Value = (Vec<u8>, u32, u32)> {
    (any::<u32>(), any::<u32>()).prop_map(|(seconds, increment)| {
        let mut out = vec![TIMESTAMP];
        out.extend_from_slice(&seconds.to_be_bytes());
        out.extend_from_slice(&increment.to_be_bytes());
        (out, seconds, increment)
    })
}

/// A value tree that knows its own KeyString encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum Sample {
    /// Encoded with the null tag.
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Array(Vec<Sample>),
    Doc(Vec<(String, Sample)>),
}

impl Sample {
    /// Appends the KeyString encoding of this value, tag first, to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Sample::Null => out.push(NULL),
            Sample::Bool(false) => out.push(BOOL_FALSE),
            Sample::Bool(true) => out.push(BOOL_TRUE),
            Sample::Int(n) => encode_int(*n, out),
            Sample::Str(s) => {
                out.push(STRING_LIKE);
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            Sample::Array(items) => {
                out.push(ARRAY);
                for item in items {
                    item.encode(out);
                }
                out.push(LEVEL_END);
            }
            Sample::Doc(fields) => {
                out.push(OBJECT);
                for (name, value) in fields {
                    let mut enc = Vec::new();
                    value.encode(&mut enc);
                    // field type tag, name, then the value with its own tag
                    out.push(enc[0]);
                    out.extend_from_slice(name.as_bytes());
                    out.push(0);
                    out.extend_from_slice(&enc);
                }
                out.push(LEVEL_END);
            }
        }
    }

    /// The KeyString encoding of this value.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }
}

/// arbitrary [`Sample`] tree for use with proptest
pub fn arb_sample() -> impl Strategy<Value = Sample> {
    let leaf = prop_oneof![
        Just(Sample::Null),
        any::<bool>().prop_map(Sample::Bool),
        arb_encoded_int().prop_map(|(_, n)| Sample::Int(n)),
        "[^\\x00]{0,16}".prop_map(Sample::Str),
    ];
    leaf.prop_recursive(
        4,  // max depth
        32, // max nodes
        8,  // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Sample::Array),
                prop::collection::btree_map("[a-z_]{1,8}", inner, 0..8)
                    .prop_map(|m| Sample::Doc(m.into_iter().collect()))
            ]
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_widths() {
        let enc = |n| {
            let mut out = Vec::new();
            encode_int(n, &mut out);
            out
        };
        assert_eq!(enc(0), vec![41]);
        assert_eq!(enc(1), vec![43, 0x02]);
        assert_eq!(enc(127), vec![43, 0xfe]);
        assert_eq!(enc(128), vec![44, 0x01, 0x00]);
        assert_eq!(enc(-1), vec![39, 0xfd]);
        assert_eq!(enc(i64::max_value()).len(), 9);
        assert_eq!(enc(i64::max_value())[0], 50);
    }

    #[test]
    fn document_fields_repeat_the_value_tag() {
        let doc = Sample::Doc(vec![("a".to_string(), Sample::Bool(true))]);
        assert_eq!(doc.to_bytes(), vec![70, 111, b'a', 0, 111, 0]);
    }
}
