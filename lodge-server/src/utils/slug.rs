//! URL slug generation for public content pages
//!
//! Slugs are derived from display names at create time. Uniqueness is
//! resolved by suffixing the current Unix-millis timestamp on collision.

/// Turn a display name into a URL slug: lowercase ASCII alphanumerics,
/// runs of anything else collapsed into single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true; // suppress leading dash

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        slug.push_str("item");
    }
    slug
}

/// Append a millisecond timestamp to a slug that collided with an existing one.
pub fn dedupe_slug(slug: &str, now_ms: i64) -> String {
    format!("{}-{}", slug, now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Deluxe Suite"), "deluxe-suite");
        assert_eq!(slugify("Spa & Wellness"), "spa-wellness");
        assert_eq!(slugify("  Océan View!  "), "oc-an-view");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify("!!!"), "item");
    }

    #[test]
    fn test_dedupe_appends_timestamp() {
        assert_eq!(dedupe_slug("deluxe-suite", 1700000000000), "deluxe-suite-1700000000000");
    }
}
