//! Text Extractor — converts an uploaded PDF into plain text, bounded in size.

use anyhow::anyhow;
use bytes::Bytes;

use crate::errors::AppError;

/// Hard character limit for extracted text. Protects downstream request-size
/// limits on the LLM call; exceeding it truncates silently, never errors.
pub const MAX_EXTRACT_CHARS: usize = 200_000;

/// Decodes PDF bytes to text, trims surrounding whitespace, and truncates to
/// `MAX_EXTRACT_CHARS`. Corrupt or non-PDF bytes fail with
/// `AppError::Extraction` — the upload already passed request validation, so
/// this is a server-side failure, not the caller's.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("failed to decode PDF: {e}")))?;

    Ok(truncate_chars(text.trim(), MAX_EXTRACT_CHARS).to_string())
}

/// Async wrapper that moves the CPU-bound decode off the runtime worker.
pub async fn extract_pdf_text_async(bytes: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow!("PDF extraction task panicked: {e}")))?
}

/// Truncates to at most `max` characters, respecting char boundaries.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        let s = "é".repeat(10);
        let truncated = truncate_chars(&s, 4);
        assert_eq!(truncated.chars().count(), 4);
        assert_eq!(truncated, "éééé");
    }

    #[test]
    fn test_truncate_chars_leaves_short_input_alone() {
        assert_eq!(truncate_chars("short", MAX_EXTRACT_CHARS), "short");
    }

    #[test]
    fn test_char_limit_is_enforced() {
        let s = "x".repeat(MAX_EXTRACT_CHARS + 500);
        assert_eq!(truncate_chars(&s, MAX_EXTRACT_CHARS).len(), MAX_EXTRACT_CHARS);
    }

    #[test]
    fn test_non_pdf_bytes_fail_with_extraction_error() {
        let result = extract_pdf_text(b"definitely not a pdf");
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
