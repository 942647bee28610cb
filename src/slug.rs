//! Filesystem-safe identifiers derived from display names.

/// Identifier used when a name has no usable characters at all.
pub const FALLBACK_SLUG: &str = "nametag";

/// Normalize a display name into a filesystem-safe slug.
///
/// The name is lowercased, every run of characters outside `[a-z0-9]` becomes
/// a single `_`, and leading/trailing `_` are dropped. A name with nothing left
/// maps to [`FALLBACK_SLUG`].
///
/// ```
/// use tagsmith::slug::slugify;
/// assert_eq!(slugify("Ada Lovelace"), "ada_lovelace");
/// assert_eq!(slugify("  --  "), "nametag");
/// ```
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            slug.push(ch);
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
