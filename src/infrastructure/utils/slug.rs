/// Returns the slug to persist for an entity that is being created.
///
/// An explicit, non-blank slug is kept untouched. Otherwise the slug is derived
/// from the title: lowercase ASCII, Unicode transliterated, and every run of
/// non-alphanumeric characters collapsed into a single hyphen.
///
/// This runs once, before the first insert. Updates never call it, so a slug
/// does not follow later title edits.
pub fn assign_slug(title: &str, existing: Option<&str>) -> String {
    match existing {
        Some(slug) if !slug.trim().is_empty() => slug.to_string(),
        _ => slug::slugify(title),
    }
}
