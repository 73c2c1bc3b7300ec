//! One-line preview helpers for listing output.

/// Maximum bytes fetched from a blob when building a preview line.
pub const PREVIEW_FETCH_LEN: usize = 256;

/// Reduces raw note bytes to their first line, lossily decoded.
///
/// Pairs with `Repository::blob_head`: the store bounds how much is read,
/// this bounds what is shown.
pub fn first_line(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.lines().next().unwrap_or_default().trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_text_up_to_first_break() {
        assert_eq!(first_line(b"title line\nrest of note"), "title line");
    }

    #[test]
    fn single_line_passes_through() {
        assert_eq!(first_line(b"only line"), "only line");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(first_line(b""), "");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let line = first_line(&[0x66, 0x6f, 0xff, 0x6f]);
        assert!(line.starts_with("fo"));
    }
}
