use regex::Regex;

/// Glob-style match where `*` is any run of characters and `?` is exactly one.
/// Patterns without wildcards compare for equality.
pub fn matches(candidate: &str, pattern: &str) -> bool {
    if !pattern.contains(['*', '?']) {
        return candidate == pattern;
    }

    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');

    Regex::new(&re).is_ok_and(|r| r.is_match(candidate))
}
