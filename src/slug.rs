/// Converts free text into a filesystem and identifier safe token.
///
/// The text is lowercased, every run of characters outside `[a-z0-9]` collapses
/// into a single `-`, and leading or trailing dashes are trimmed.
///
/// ```
/// use nodewire::slug::slugify;
///
/// assert_eq!(slugify("IF Node!"), "if-node");
/// assert_eq!(slugify("--A--"), "a");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}
