//! URL joining shared by every hosting adapter.

/// Join URL parts with single `/` separators.
///
/// - empty parts are skipped, so an absent subdirectory leaves no trace
/// - leading slashes are trimmed from every part but the first, trailing
///   slashes from every part but the last
/// - the last part keeps at most one trailing slash
/// - a `scheme:` prefix is normalized to `scheme://`
/// - a slash right before `?`, `&` or `#` is dropped
pub fn join_url_parts<S: AsRef<str>>(parts: &[S]) -> String {
    let last = parts.len().saturating_sub(1);
    let mut segments: Vec<String> = Vec::with_capacity(parts.len());

    for (i, part) in parts.iter().enumerate() {
        let mut component = part.as_ref();
        if component.is_empty() {
            continue;
        }
        if i > 0 {
            component = component.trim_start_matches('/');
        }
        let component = if i < last {
            component.trim_end_matches('/').to_string()
        } else if component.ends_with('/') {
            format!("{}/", component.trim_end_matches('/'))
        } else {
            component.to_string()
        };
        if component.is_empty() {
            continue;
        }
        segments.push(component);
    }

    let Some(first) = segments.first_mut() else {
        return String::new();
    };
    *first = normalize_scheme(first);

    strip_slash_before_query(&segments.join("/"))
}

fn normalize_scheme(first: &str) -> String {
    let Some((scheme, rest)) = first.split_once(':') else {
        return first.to_string();
    };
    let is_scheme = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !is_scheme || !rest.starts_with('/') {
        return first.to_string();
    }
    format!("{scheme}://{}", rest.trim_start_matches('/'))
}

fn strip_slash_before_query(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut chars = url.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '/' && matches!(chars.peek(), Some('?' | '&' | '#')) {
            continue;
        }
        out.push(c);
    }
    out
}
