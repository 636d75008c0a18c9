/// Whether a matched value is a template rather than a real credential.
///
/// Only explicit markers count. Substrings that can appear inside real
/// tokens (`test`, `example`) are not treated as placeholders.
pub fn looks_like_placeholder(matched_text: &str) -> bool {
    let lower = matched_text.to_lowercase();

    let template_markers = ["<", ">", "${", "{{"];
    if template_markers.iter().any(|m| lower.contains(m)) {
        return true;
    }

    let placeholder_prefixes = ["your_", "your-", "replace_me", "change_me", "changeme", "xxxx"];
    placeholder_prefixes.iter().any(|p| lower.starts_with(p))
}
