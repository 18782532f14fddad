//! URL validation and normalization
//!
//! User input is checked against generic URI-reference syntax (RFC 3986),
//! not HTTP-specific rules, so bare host tokens such as `example.com` or
//! `localhost:8080` pass. Anything that does not already carry an HTTP
//! scheme gets `http://` in front.

use crate::error::FetchError;

/// Schemes the fetcher speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlScheme {
    Http,
    Https,
}

impl UrlScheme {
    /// Get the scheme prefix string
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Http => "http://",
            Self::Https => "https://",
        }
    }

    /// Detect the scheme of `url`. The check is case-sensitive.
    pub fn of(url: &str) -> Option<Self> {
        [Self::Http, Self::Https]
            .into_iter()
            .find(|scheme| url.starts_with(scheme.prefix()))
    }
}

/// Validate `raw` and make sure it starts with `http://` or `https://`.
///
/// # Example
/// ```
/// use rfetch::url::normalize;
///
/// assert_eq!(normalize("example.com").unwrap(), "http://example.com");
/// assert_eq!(normalize("https://example.com").unwrap(), "https://example.com");
/// assert!(normalize("").is_err());
/// ```
pub fn normalize(raw: &str) -> Result<String, FetchError> {
    validate_uri_reference(raw)?;

    if UrlScheme::of(raw).is_some() {
        return Ok(raw.to_string());
    }

    // The prefix moves any authority of `raw` into the path, which can
    // leave an IP literal where brackets are not allowed
    let url = format!("{}{}", UrlScheme::Http.prefix(), raw);
    validate_uri_reference(&url).map_err(|_| {
        FetchError::invalid_url(raw, "not a valid URL once http:// is added")
    })?;
    Ok(url)
}

/// Check that `raw` is a syntactically valid URI reference.
pub fn validate_uri_reference(raw: &str) -> Result<(), FetchError> {
    if raw.is_empty() {
        return Err(FetchError::invalid_url(raw, "empty URL"));
    }

    check_characters(raw)?;
    check_percent_encoding(raw)?;

    if raw.matches('#').count() > 1 {
        return Err(FetchError::invalid_url(raw, "more than one '#' fragment marker"));
    }

    check_scheme(raw)?;
    check_ip_literal(raw)
}

// ============================================================================
// Internal helpers
// ============================================================================

fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            // unreserved
            '-' | '.' | '_' | '~'
            // gen-delims
            | ':' | '/' | '?' | '#' | '[' | ']' | '@'
            // sub-delims
            | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
            | '%'
        )
}

fn check_characters(raw: &str) -> Result<(), FetchError> {
    match raw.chars().find(|c| !is_uri_char(*c)) {
        Some(c) => Err(FetchError::invalid_url(
            raw,
            format!("invalid character {:?}", c),
        )),
        None => Ok(()),
    }
}

/// Every '%' must start a two-digit hex escape.
fn check_percent_encoding(raw: &str) -> Result<(), FetchError> {
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            let valid = escape.is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                let end = (i + 3).min(raw.len());
                return Err(FetchError::invalid_url(
                    raw,
                    format!("invalid percent-encoding {:?}", &raw[i..end]),
                ));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(())
}

/// A ':' before the first '/', '?' or '#' either ends a scheme or makes the
/// reference invalid (a relative path's first segment cannot hold a colon).
fn check_scheme(raw: &str) -> Result<(), FetchError> {
    let head_end = raw.find(['/', '?', '#']).unwrap_or(raw.len());
    let Some(colon) = raw[..head_end].find(':') else {
        return Ok(());
    };

    let scheme = &raw[..colon];
    let mut chars = scheme.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if scheme.is_empty() {
        Err(FetchError::invalid_url(raw, "missing scheme before ':'"))
    } else if starts_with_letter && rest_valid {
        Ok(())
    } else {
        Err(FetchError::invalid_url(
            raw,
            "first path segment in URL cannot contain ':'",
        ))
    }
}

/// The authority part of `raw` (between `//` and the next `/`, `?` or `#`).
fn authority(raw: &str) -> Option<&str> {
    let head_end = raw.find(['/', '?', '#']).unwrap_or(raw.len());
    let rest = match raw[..head_end].find(':') {
        Some(colon) => &raw[colon + 1..],
        None => raw,
    };
    let rest = rest.strip_prefix("//")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// '[' and ']' may only enclose an IP literal that makes up the whole host.
fn check_ip_literal(raw: &str) -> Result<(), FetchError> {
    let is_bracket = |c: char| c == '[' || c == ']';
    if !raw.contains(is_bracket) {
        return Ok(());
    }

    let misplaced = || {
        FetchError::invalid_url(raw, "'[' and ']' are only allowed around an IP literal host")
    };

    let authority = authority(raw).ok_or_else(misplaced)?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if host_port.matches(is_bracket).count() != raw.matches(is_bracket).count() {
        return Err(misplaced());
    }

    let rest = host_port.strip_prefix('[').ok_or_else(misplaced)?;
    let (literal, after) = rest
        .split_once(']')
        .ok_or_else(|| FetchError::invalid_url(raw, "unclosed '[' in host"))?;

    let literal_valid = !literal.is_empty()
        && literal
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.');
    if !literal_valid {
        return Err(FetchError::invalid_url(
            raw,
            format!("invalid IP literal [{}]", literal),
        ));
    }

    match after.strip_prefix(':') {
        None if after.is_empty() => Ok(()),
        Some(port) if port.chars().all(|c| c.is_ascii_digit()) => Ok(()),
        _ => Err(misplaced()),
    }
}
