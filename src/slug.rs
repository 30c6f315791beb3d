/// Turn heading text into an anchor id.
///
/// Lowercases, keeps alphanumeric characters and collapses every other run
/// of characters into a single `-`. Leading and trailing separators are
/// dropped, so the result may be empty for text with no alphanumerics.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
