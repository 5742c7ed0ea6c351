//! Free-text search helpers shared by repository search queries.

/// Maximum number of results returned by user search.
pub const USER_SEARCH_LIMIT: i64 = 10;

/// Build an `ILIKE` substring pattern, escaping the wildcard characters in
/// the user's query. Returns `None` for a blank query.
pub fn like_pattern(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(trimmed.len() + 2);
    escaped.push('%');
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}
