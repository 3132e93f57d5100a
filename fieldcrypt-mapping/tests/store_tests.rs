use fieldcrypt_crypto::{CryptoError, ErrorKind};
use fieldcrypt_mapping::{
    decode_base64, encode_base64, JsonSerializer, PayloadCodec, StorageFormat, StoreEncoding,
    StoreValue,
};
use pretty_assertions::assert_eq;

// ── StorageFormat resolution ─────────────────────────────────────

#[test]
fn default_format_picks_base64_for_strings() {
    assert_eq!(
        StorageFormat::Default.resolve(&PayloadCodec::Utf8),
        StoreEncoding::Base64
    );
}

#[test]
fn default_format_picks_base64_for_secret_strings() {
    assert_eq!(
        StorageFormat::Default.resolve(&PayloadCodec::SecretUtf8),
        StoreEncoding::Base64
    );
}

#[test]
fn default_format_picks_binary_for_bytes_and_custom() {
    assert_eq!(
        StorageFormat::Default.resolve(&PayloadCodec::Bytes),
        StoreEncoding::Binary
    );
    let custom = PayloadCodec::custom::<Vec<String>, _>(JsonSerializer);
    assert_eq!(StorageFormat::Default.resolve(&custom), StoreEncoding::Binary);
}

#[test]
fn explicit_formats_override_the_codec() {
    assert_eq!(
        StorageFormat::Binary.resolve(&PayloadCodec::Utf8),
        StoreEncoding::Binary
    );
    assert_eq!(
        StorageFormat::Base64.resolve(&PayloadCodec::Bytes),
        StoreEncoding::Base64
    );
}

#[test]
fn storage_format_serde_names() {
    assert_eq!(StorageFormat::default(), StorageFormat::Default);
    assert_eq!(
        serde_json::to_string(&StorageFormat::Base64).unwrap(),
        "\"base64\""
    );
    let parsed: StorageFormat = serde_json::from_str("\"binary\"").unwrap();
    assert_eq!(parsed, StorageFormat::Binary);
}

// ── StoreEncoding ────────────────────────────────────────────────

#[test]
fn binary_encoding_keeps_bytes() {
    let value = StoreEncoding::Binary.encode(vec![1, 2, 3]);
    assert_eq!(value, StoreValue::Binary(vec![1, 2, 3]));
    assert_eq!(value.as_bytes(), Some(&[1u8, 2, 3][..]));
    assert_eq!(value.as_text(), None);
    assert_eq!(StoreEncoding::Binary.decode(&value).unwrap(), vec![1, 2, 3]);
}

#[test]
fn base64_encoding_produces_text() {
    let value = StoreEncoding::Base64.encode(b"Hello world".to_vec());
    assert_eq!(value.as_text(), Some("SGVsbG8gd29ybGQ="));
    assert_eq!(
        StoreEncoding::Base64.decode(&value).unwrap(),
        b"Hello world".to_vec()
    );
}

#[test]
fn mismatched_store_shape_is_format_error() {
    let err = StoreEncoding::Binary
        .decode(&StoreValue::Text("AAAA".into()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let err = StoreEncoding::Base64
        .decode(&StoreValue::Binary(vec![0]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn store_value_from_impls() {
    assert_eq!(StoreValue::from(vec![9u8]), StoreValue::Binary(vec![9]));
    assert_eq!(
        StoreValue::from("abc".to_string()),
        StoreValue::Text("abc".into())
    );
}

// ── Base64 helpers ───────────────────────────────────────────────

#[test]
fn base64_uses_standard_padded_alphabet() {
    assert_eq!(encode_base64(&[0xFB, 0xFF]), "+/8=");
    assert_eq!(encode_base64(b""), "");
    assert_eq!(decode_base64("+/8=").unwrap(), vec![0xFB, 0xFF]);
}

#[test]
fn base64_does_not_wrap_lines() {
    let encoded = encode_base64(&[0x42; 300]);
    assert!(!encoded.contains('\n'));
    assert_eq!(encoded.len(), 400);
}

#[test]
fn malformed_base64_is_format_error() {
    for input in ["not base64!", "-_8=", "abc"] {
        let err = decode_base64(input).unwrap_err();
        assert!(
            matches!(err, CryptoError::Format(_)),
            "{input:?} should fail as format error, got {err:?}"
        );
    }
}
