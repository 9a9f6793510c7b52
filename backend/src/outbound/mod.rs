//! Outbound adapters: lead store, email delivery, dispatcher invocation,
//! and the in-process query cache.

pub mod cache;
pub mod dispatch;
pub mod email;
pub mod persistence;

/// Compact a response body into a short single-line diagnostic preview.
///
/// Raw bodies go to logs and error detail only, never to end users.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::body_preview;

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(
            body_preview(b"{\n  \"error\": \"boom\"\n}"),
            "{ \"error\": \"boom\" }"
        );
    }

    #[test]
    fn preview_truncates_long_bodies_with_an_ellipsis() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
