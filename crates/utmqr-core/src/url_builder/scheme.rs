//! Scheme detection and `https://` inference for bare host input.

const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// True if `input` starts with `scheme://` or a protocol-relative `//`.
///
/// The scheme part is a run of word characters (`[A-Za-z0-9_]`) followed by
/// `:`; anything else (e.g. `mailto:x`, `example.com`) counts as missing.
pub fn has_scheme_prefix(input: &str) -> bool {
    let rest = match input.find(':') {
        Some(colon)
            if colon > 0
                && input[..colon]
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_') =>
        {
            &input[colon + 1..]
        }
        _ => input,
    };
    rest.starts_with("//")
}

/// Prepends `https://` when `input` has no scheme prefix; otherwise returns it unchanged.
pub fn with_default_scheme(input: &str) -> String {
    if has_scheme_prefix(input) {
        input.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{input}")
    }
}
