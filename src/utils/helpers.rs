use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of a string, hex-encoded.
///
/// Used as the deduplication key for clipboard content.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Current wall-clock time as Unix epoch milliseconds.
pub fn current_time_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Truncate text to `max_chars` characters, appending an ellipsis.
///
/// Operates on character boundaries so multi-byte content never splits.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("hello");
        assert_eq!(hash.len(), 64);
        // Stable digest for identical input
        assert_eq!(hash, sha256_hex("hello"));
        assert_ne!(hash, sha256_hex("hello "));
    }

    #[test]
    fn test_current_time_millis() {
        let t = current_time_millis();
        // Past 2020-01-01 in milliseconds
        assert!(t > 1_577_836_800_000);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 50), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        // Multi-byte characters are not split
        assert_eq!(truncate_text("日本語テキスト", 3), "日本語...");
    }
}
