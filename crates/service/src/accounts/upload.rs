/// Reduce an uploaded file name to `[A-Za-z0-9._-]`, whitespace and path
/// separators folded into `_`, with leading/trailing dots and underscores
/// stripped. May return an empty string.
pub fn sanitize_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Stored name for a user's profile image.
pub fn profile_image_name(user_id: &str, original: &str) -> Option<String> {
    let clean = sanitize_filename(original);
    if clean.is_empty() {
        return None;
    }
    Some(format!("{user_id}_{clean}"))
}
