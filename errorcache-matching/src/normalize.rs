//! Normalization pipeline.
//!
//! Steps, in order: truncate → paths → `:line:col` → `line N` → hex
//! addresses → UUIDs → long digit runs → case-fold → whitespace collapse.

use std::sync::LazyLock;

use errorcache_core::constants::MAX_ERROR_TEXT_CHARS;
use regex::Regex;

macro_rules! norm_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

norm_pattern!(
    RE_WINDOWS_PATH,
    r"[A-Za-z]:\\(?:[^\\\s:]+\\)*[^\\\s:]+(?::\d+)*"
);
norm_pattern!(
    RE_UNIX_PATH,
    r"(?:~|\.{1,2})?(?:/[\w.@+\-]+){2,}(?::\d+)*|(?:[\w.@+\-]+/)+[\w@+\-]+\.[A-Za-z0-9]{1,8}(?::\d+)*"
);
norm_pattern!(RE_LINE_COL, r":\d+:\d+\b");
norm_pattern!(RE_LINE_WORD, r"(?i)\bline \d+");
norm_pattern!(RE_HEX_ADDR, r"\b0[xX][0-9a-fA-F]+\b");
norm_pattern!(
    RE_UUID,
    r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b"
);
norm_pattern!(RE_LONG_NUMBER, r"\d{4,}");
norm_pattern!(RE_WHITESPACE, r"\s+");

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn replace(re: &LazyLock<Option<Regex>>, text: String, with: &str) -> String {
    match re.as_ref() {
        Some(re) => re.replace_all(&text, with).into_owned(),
        None => text,
    }
}

/// Normalize raw error text into a matching signature.
pub fn normalize(text: &str) -> String {
    let mut out = truncate_chars(text, MAX_ERROR_TEXT_CHARS).to_string();
    out = replace(&RE_WINDOWS_PATH, out, "<path>");
    out = replace(&RE_UNIX_PATH, out, "<path>");
    out = replace(&RE_LINE_COL, out, ":<n>");
    out = replace(&RE_LINE_WORD, out, "line <n>");
    out = replace(&RE_HEX_ADDR, out, "<addr>");
    out = replace(&RE_UUID, out, "<uuid>");
    out = replace(&RE_LONG_NUMBER, out, "<n>");
    out = out.to_lowercase();
    replace(&RE_WHITESPACE, out, " ").trim().to_string()
}
