//! Identifier legalization for generated script

/// Turn an arbitrary host name into a valid script identifier
///
/// Characters outside `[A-Za-z0-9_$]` become `_`; a leading digit (or an
/// empty name) gets a `_` prefix.
pub fn legal_js_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' { ch } else { '_' })
        .collect();

    if out.chars().next().map_or(true, |ch| ch.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
