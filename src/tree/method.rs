use crate::ConfigurationError;

/// The HTTP methods that a route may be registered against.
///
/// Extension methods are not routable; [`crate::tree::Step`]s and route
/// descriptions naming anything else are rejected.
pub const METHODS: [http::Method; 9] = [
    http::Method::GET,
    http::Method::HEAD,
    http::Method::POST,
    http::Method::PUT,
    http::Method::DELETE,
    http::Method::TRACE,
    http::Method::OPTIONS,
    http::Method::PATCH,
    http::Method::CONNECT,
];

/// Matches the token against [`METHODS`], ignoring case.  The returned
/// method is always the canonical (uppercase) one.
pub(crate) fn parse(token: &str) -> Result<http::Method, ConfigurationError> {
    METHODS
        .iter()
        .find(|method| method.as_str().eq_ignore_ascii_case(token))
        .cloned()
        .ok_or_else(|| ConfigurationError::UnknownMethod(token.to_owned()))
}
