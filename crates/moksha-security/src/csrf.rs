//! CSRF token lookup.

/// Cookie the backend sets with the session's CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the token is echoed in on state-changing requests.
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Extract the CSRF token from a `Cookie` header value such as `a=1; csrftoken=xyz`.
///
/// An empty token is treated as absent.
pub fn csrf_token_from_cookie_header(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == CSRF_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
