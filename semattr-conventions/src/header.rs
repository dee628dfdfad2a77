use semattr_protocol::AttributeKey;

/// Prefix of the attributes for captured request headers.
pub const REQUEST_HEADER_PREFIX: &str = "http.request.header.";

/// Prefix of the attributes for captured response headers.
pub const RESPONSE_HEADER_PREFIX: &str = "http.response.header.";

/// Normalizes a header name for use in an attribute key.
///
/// Lowercases ASCII letters and replaces every character that is not an ASCII letter or digit
/// with `_`. The empty name stays empty.
///
/// # Example
///
/// ```
/// assert_eq!(semattr_conventions::normalize_header_name("X-Trace"), "x_trace");
/// ```
pub fn normalize_header_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
            _ => '_',
        })
        .collect()
}

/// Returns the key under which values of the request header `name` are captured.
pub fn request_header_key(name: &str) -> AttributeKey<Vec<String>> {
    header_key(REQUEST_HEADER_PREFIX, name)
}

/// Returns the key under which values of the response header `name` are captured.
pub fn response_header_key(name: &str) -> AttributeKey<Vec<String>> {
    header_key(RESPONSE_HEADER_PREFIX, name)
}

fn header_key(prefix: &str, name: &str) -> AttributeKey<Vec<String>> {
    let mut key = String::with_capacity(prefix.len() + name.len());
    key.push_str(prefix);
    key.push_str(&normalize_header_name(name));
    AttributeKey::owned(key)
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_header_name() {
        assert_eq!(normalize_header_name("Content-Type"), "content_type");
        assert_eq!(normalize_header_name("x.custom header"), "x_custom_header");
        assert_eq!(normalize_header_name("ÄB"), "_b");
        assert_eq!(normalize_header_name(""), "");
    }

    #[test]
    fn test_header_keys() {
        assert_eq!(
            request_header_key("X-Trace").name(),
            "http.request.header.x_trace"
        );
        assert_eq!(
            response_header_key("Content-Length").name(),
            "http.response.header.content_length"
        );
    }
}
