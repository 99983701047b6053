/// Built-in reading-status shelves every profile has.
pub const CANONICAL_SHELVES: [&str; 3] = ["Przeczytane", "Teraz czytam", "Chcę przeczytać"];

pub const SHELF_SEPARATOR: &str = ", ";

pub fn is_canonical(name: &str) -> bool {
    CANONICAL_SHELVES.contains(&name)
}

/// Split shelf labels into `(canonical, custom)`, each joined with [`SHELF_SEPARATOR`].
///
/// Label order is preserved within each side.
pub fn partition_shelves<I, S>(names: I) -> (String, String)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut canonical = Vec::new();
    let mut custom = Vec::new();

    for name in names {
        let name = name.as_ref().trim();
        if is_canonical(name) {
            canonical.push(name.to_string());
        } else {
            custom.push(name.to_string());
        }
    }

    (canonical.join(SHELF_SEPARATOR), custom.join(SHELF_SEPARATOR))
}
