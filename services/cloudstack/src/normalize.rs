use crate::constants::TRIM_WHITESPACE;

const PATH_SEPARATOR: char = '/';
const NAMESPACE_SEPARATOR: char = '\\';

/// Strip whitespace and `/` from both ends of a path segment.
pub(crate) fn trim_path_segment(segment: &str) -> &str {
    segment.trim_matches(|c| c == PATH_SEPARATOR || TRIM_WHITESPACE.contains(&c))
}

/// Strip whitespace and `\` from both ends, then collapse `\` runs into one.
pub(crate) fn normalize_namespace(namespace: &str) -> String {
    let trimmed =
        namespace.trim_matches(|c| c == NAMESPACE_SEPARATOR || TRIM_WHITESPACE.contains(&c));

    let mut out = String::with_capacity(trimmed.len());
    let mut after_separator = false;
    for c in trimmed.chars() {
        let is_separator = c == NAMESPACE_SEPARATOR;
        if !(is_separator && after_separator) {
            out.push(c);
        }
        after_separator = is_separator;
    }
    out
}
