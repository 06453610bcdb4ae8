//! Endpoint URL construction

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in query values: anything that could break a value out
/// of its `key=value` slot, plus whitespace and controls.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Joins non-empty, slash-trimmed path segments onto a base URL.
///
/// Empty segments are skipped so callers can pass optional path parts
/// without special-casing.
pub fn build_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let trimmed = segment.trim_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(trimmed);
    }
    url
}

/// Appends query pairs to a URL, percent-encoding the values.
///
/// Values are usually numbers or closed-vocabulary tokens (page, size,
/// status codes, sort keys), which pass through untouched; caller-supplied
/// strings with reserved characters are escaped rather than silently
/// corrupting the query. Keys are literal field names and stay as-is.
pub fn append_query(url: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }
    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query)
}
