//! Tests for [`openai_client::mask_token`], used whenever a backend key reaches the logs.

use openai_client::mask_token;

/// **Test: Keys up to 11 bytes reveal nothing.**
#[test]
fn short_keys_are_fully_hidden() {
    for key in ["", "k", "sk-abc", "sk-proj-12"] {
        assert_eq!(mask_token(key), "***", "key {:?}", key);
    }
    assert_eq!(mask_token("12345678901"), "***");
}

/// **Test: From 12 bytes on, the 7-byte prefix and 4-byte suffix stay visible.**
#[test]
fn long_keys_keep_prefix_and_suffix() {
    assert_eq!(mask_token("123456789012"), "1234567***9012");
    assert_eq!(
        mask_token("sk-live-0123456789abcdefghij"),
        "sk-live***ghij"
    );
}

/// **Test: The secret middle of the key never appears in the masked form.**
#[test]
fn middle_of_key_is_not_leaked() {
    let key = "sk-proj-SECRETSECRETSECRET-tail";
    let masked = mask_token(key);
    assert!(!masked.contains("SECRET"), "{}", masked);
    assert_eq!(masked.len(), 14);
}

/// **Test: A key whose cut points fall inside a multi-byte character is fully hidden.**
#[test]
fn non_ascii_cut_points_are_fully_hidden() {
    assert_eq!(mask_token("ключ-ключ-ключ"), "***");
}
