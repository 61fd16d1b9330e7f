use keystring::prelude::*;
use pretty_assertions::assert_eq;

const RESUME_TOKEN: &str = concat!(
    // clusterTime
    "825f00000100000002",
    // version
    "2b02",
    // tokenType
    "2c0100",
    // txnOpIndex
    "29",
    // fromInvalidate
    "6e",
    // uuid
    "5a1004",
    "00112233445566778899aabbccddeeff",
    // documentKey
    "46",
    "645f696400",
    "645f00000000000000000000ab",
    "00",
);

#[test]
fn resume_token_fields() {
    let mut ks = KeyString::from_hex(RESUME_TOKEN).unwrap();

    let mut next = || ks.decode_one_value().unwrap();
    let cluster_time = next();
    let version = next();
    let token_type = next();
    let txn_op_index = next();
    let from_invalidate = next();
    let uuid = next();
    let document_key = next();

    assert_eq!(
        cluster_time,
        Value::Timestamp(Timestamp {
            seconds: 0x5f00_0001,
            increment: 2,
        })
    );
    assert_eq!(version, Value::Integer(1));
    assert_eq!(token_type, Value::Integer(128));
    assert_eq!(txn_op_index, Value::Integer(0));
    assert_eq!(from_invalidate, Value::Bool(false));
    assert_eq!(
        uuid,
        Value::Binary(Binary {
            subtype: 4,
            bytes: Bytes::from(hex::decode("00112233445566778899aabbccddeeff").unwrap()),
        })
    );

    let mut oid = [0u8; 12];
    oid[0] = 0x5f;
    oid[11] = 0xab;
    let mut expected_key = Document::new();
    expected_key.insert("_id".to_string(), Value::ObjectId(ObjectId(oid)));
    assert_eq!(document_key, Value::Document(expected_key));

    assert!(ks.cursor().is_exhausted());
}

#[test]
fn resume_token_as_iterator() {
    let mut ks = KeyString::from_hex(RESUME_TOKEN).unwrap();
    let values: Vec<Value> = ks.values().collect::<Result<_, _>>().unwrap();

    let kinds: Vec<&str> = values.iter().map(Value::type_name).collect();
    assert_eq!(
        kinds,
        vec!["timestamp", "integer", "integer", "integer", "bool", "binData", "document"]
    );
}

#[test]
fn resume_token_with_direction_markers() {
    // the same fields, with a marker in front of the first and last
    let hex = format!("fe{}", RESUME_TOKEN.replacen("46", "0146", 1));
    let mut plain = KeyString::from_hex(RESUME_TOKEN).unwrap();
    let mut marked = KeyString::from_hex(&hex).unwrap();

    let plain: Vec<Value> = plain.values().collect::<Result<_, _>>().unwrap();
    let marked: Vec<Value> = marked.values().collect::<Result<_, _>>().unwrap();
    assert_eq!(plain, marked);
}
