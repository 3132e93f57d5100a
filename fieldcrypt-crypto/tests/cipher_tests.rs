use fieldcrypt_crypto::cipher::{decrypt, encrypt};
use fieldcrypt_crypto::{
    generate_key, BlockMode, CipherConfig, ErrorKind, Iv, Key, KeySize, PaddingMode,
};
use pretty_assertions::assert_eq;

const SIZES: [KeySize; 3] = [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256];

fn zeros() -> CipherConfig {
    CipherConfig::new(BlockMode::Cbc, PaddingMode::Zeros)
}

#[test]
fn encrypt_decrypt_roundtrip_all_key_sizes() {
    for size in SIZES {
        let info = generate_key(size);
        let plaintext = b"Hello, World!";
        let config = CipherConfig::default();
        let encrypted = encrypt(&info.key, &info.iv, &config, plaintext).unwrap().unwrap();
        let decrypted = decrypt(&info.key, &info.iv, &config, &encrypted).unwrap().unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn encrypt_empty_is_no_value() {
    let info = generate_key(KeySize::Aes256);
    assert!(encrypt(&info.key, &info.iv, &CipherConfig::default(), b"").unwrap().is_none());
}

#[test]
fn decrypt_empty_is_no_value() {
    let info = generate_key(KeySize::Aes256);
    assert!(decrypt(&info.key, &info.iv, &CipherConfig::default(), b"").unwrap().is_none());
}

#[test]
fn encrypt_decrypt_large_data() {
    let info = generate_key(KeySize::Aes256);
    let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();
    let config = CipherConfig::default();
    let encrypted = encrypt(&info.key, &info.iv, &config, &plaintext).unwrap().unwrap();
    let decrypted = decrypt(&info.key, &info.iv, &config, &encrypted).unwrap().unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn hello_world_with_zero_key_is_one_block() {
    let key = Key::from_slice(&[0u8; 32]).unwrap();
    let iv = Iv::from_bytes([0u8; 16]);
    let config = CipherConfig::default();

    let encrypted = encrypt(&key, &iv, &config, b"Hello world").unwrap().unwrap();
    assert_eq!(encrypted.len(), 16);

    let decrypted = decrypt(&key, &iv, &config, &encrypted).unwrap().unwrap();
    assert_eq!(decrypted, b"Hello world".to_vec());
    assert_eq!(decrypted.len(), 11);
}

#[test]
fn same_key_and_iv_is_deterministic() {
    let info = generate_key(KeySize::Aes128);
    let config = CipherConfig::default();
    let e1 = encrypt(&info.key, &info.iv, &config, b"Same").unwrap();
    let e2 = encrypt(&info.key, &info.iv, &config, b"Same").unwrap();
    assert_eq!(e1, e2);
}

#[test]
fn different_iv_changes_ciphertext() {
    let info = generate_key(KeySize::Aes128);
    let config = CipherConfig::default();
    let e1 = encrypt(&info.key, &info.iv, &config, b"Same").unwrap();
    let e2 = encrypt(&info.key, &Iv::random(), &config, b"Same").unwrap();
    assert_ne!(e1, e2);
}

// ── Padding ──────────────────────────────────────────────────────

#[test]
fn pkcs7_output_is_padded_to_next_block() {
    let info = generate_key(KeySize::Aes256);
    let config = CipherConfig::default();
    for len in [1usize, 15, 16, 17, 31, 32] {
        let plaintext = vec![0xAB; len];
        let encrypted = encrypt(&info.key, &info.iv, &config, &plaintext).unwrap().unwrap();
        assert_eq!(encrypted.len(), (len / 16 + 1) * 16);
    }
}

#[test]
fn zero_padding_roundtrip() {
    let info = generate_key(KeySize::Aes192);
    let encrypted = encrypt(&info.key, &info.iv, &zeros(), b"Lorem Ipsum").unwrap().unwrap();
    assert_eq!(encrypted.len(), 16);
    let decrypted = decrypt(&info.key, &info.iv, &zeros(), &encrypted).unwrap().unwrap();
    assert_eq!(decrypted, b"Lorem Ipsum");
}

#[test]
fn zero_padding_strips_trailing_nuls() {
    let info = generate_key(KeySize::Aes256);
    let encrypted = encrypt(&info.key, &info.iv, &zeros(), b"abc\0\0").unwrap().unwrap();
    let decrypted = decrypt(&info.key, &info.iv, &zeros(), &encrypted).unwrap().unwrap();
    assert_eq!(decrypted, b"abc");
}

// ── Failures ─────────────────────────────────────────────────────

#[test]
fn unaligned_ciphertext_is_cipher_error() {
    let info = generate_key(KeySize::Aes256);
    let err = decrypt(&info.key, &info.iv, &CipherConfig::default(), &[1u8; 17]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cipher);
}

#[test]
fn wrong_key_fails_padding_check() {
    // PKCS#7 validation catches a wrong key with overwhelming probability;
    // a fixed pair of keys keeps the test deterministic.
    let key1 = Key::from_slice(&[1u8; 32]).unwrap();
    let key2 = Key::from_slice(&[2u8; 32]).unwrap();
    let iv = Iv::from_bytes([0u8; 16]);
    let config = CipherConfig::default();

    let encrypted = encrypt(&key1, &iv, &config, b"Secret").unwrap().unwrap();
    let result = decrypt(&key2, &iv, &config, &encrypted);
    match result {
        Err(err) => assert_eq!(err.kind(), ErrorKind::Cipher),
        Ok(plaintext) => assert_ne!(plaintext.as_deref(), Some(&b"Secret"[..])),
    }
}

#[test]
fn tampered_last_block_fails_padding_check() {
    let key = Key::from_slice(&[9u8; 16]).unwrap();
    let iv = Iv::from_bytes([3u8; 16]);
    let config = CipherConfig::default();

    let mut encrypted = encrypt(&key, &iv, &config, b"0123456789abcdef").unwrap().unwrap();
    // The second block is pure padding (16 x 0x10); replacing it with zeros
    // guarantees garbage in the final byte.
    let len = encrypted.len();
    encrypted[len - 16..].fill(0);
    let result = decrypt(&key, &iv, &config, &encrypted);
    match result {
        Err(err) => assert_eq!(err.kind(), ErrorKind::Cipher),
        Ok(plaintext) => assert_ne!(plaintext.as_deref(), Some(&b"0123456789abcdef"[..])),
    }
}
