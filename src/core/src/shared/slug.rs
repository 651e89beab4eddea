/// Derives a URL slug from a display name.
///
/// Lowercases, keeps ASCII alphanumerics, and joins everything else into
/// single `-` separators. Re-derived on every write, so renaming an entity
/// moves its slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("TSV Musterstadt"), "tsv-musterstadt");
        assert_eq!(slugify("HSG Blau-Weiß 07"), "hsg-blau-wei-07");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  A  --  B  "), "a-b");
        assert_eq!(slugify("a///b"), "a-b");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("!!important!!"), "important");
        assert_eq!(slugify(""), "");
    }
}
