//! Plain-text previews for markdown journal notes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest preview kept on a note, in characters.
pub const PREVIEW_MAX_CHARS: usize = 120;

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\([^)]*\)").expect("valid image regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\*_`#>~\-\[\]\(\)!]+").expect("valid symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Strips markdown from `content` and keeps the first
/// [`PREVIEW_MAX_CHARS`] characters.
///
/// Images are dropped, links keep their label. Returns `None` when nothing
/// readable is left.
pub fn note_preview(content: &str) -> Option<String> {
    let without_images = IMAGE_RE.replace_all(content, " ");
    let without_links = LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = SYMBOL_RE.replace_all(&without_links, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::{note_preview, PREVIEW_MAX_CHARS};

    #[test]
    fn keeps_link_labels_and_drops_images() {
        let preview = note_preview("Grateful for [Ana](https://a.example) ![sun](sun.png) today")
            .expect("preview");
        assert_eq!(preview, "Grateful for Ana today");
    }

    #[test]
    fn strips_symbols_and_caps_length() {
        let source = format!("# Morning pages\n\n**{}**", "x".repeat(400));
        let preview = note_preview(&source).expect("preview");
        assert!(preview.starts_with("Morning pages"));
        assert!(!preview.contains('#'));
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS);
    }

    #[test]
    fn symbol_only_content_has_no_preview() {
        assert_eq!(note_preview("## --- **"), None);
        assert_eq!(note_preview(""), None);
    }
}
