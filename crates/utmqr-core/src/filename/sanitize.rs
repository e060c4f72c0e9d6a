//! Filename-segment sanitization.

/// Characters that cannot appear in an export filename.
pub const FORBIDDEN_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '#'];

pub fn is_forbidden(c: char) -> bool {
    FORBIDDEN_CHARS.contains(&c)
}

/// Replaces every run of forbidden characters with a single `_`.
///
/// Other characters, including spaces and existing underscores, pass through
/// untouched; the result is not trimmed.
pub fn sanitize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut in_run = false;

    for c in segment.chars() {
        if is_forbidden(c) {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}
