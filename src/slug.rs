//! URL slugs for item titles.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, URL-safe slug: accents folded, `&` spelled out, every other
/// run of non-alphanumerics collapsed into a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.nfkd().filter(|c| !is_combining_mark(*c)) {
        match ch {
            '&' => {
                if !slug.is_empty() {
                    slug.push('-');
                }
                slug.push_str("and");
                pending_dash = true;
            }
            c if c.is_ascii_alphanumeric() => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c.to_ascii_lowercase());
            }
            // apostrophes join words: "don't" -> "dont"
            '\'' | '\u{2019}' => {}
            _ => pending_dash = true,
        }
    }
    slug
}
