//! Client address lookup in proxy headers.

/// Extracts the client address from a `Forwarded` header value.
///
/// Only the first `for=` directive is considered. Quotes, brackets around IPv6 addresses and
/// ports are removed. Returns `None` if there is no non-empty `for=` directive.
pub fn client_ip_from_forwarded(value: &str) -> Option<&str> {
    let lowercase = value.to_ascii_lowercase();
    let start = lowercase.find("for=")? + "for=".len();

    let rest = &value[start..];
    let end = rest.find([';', ',']).unwrap_or(rest.len());
    strip_address(rest[..end].trim())
}

/// Extracts the client address from an `X-Forwarded-For` header value.
///
/// The first comma-separated entry is the original client.
pub fn client_ip_from_forwarded_for(value: &str) -> Option<&str> {
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then_some(first)
}

fn strip_address(address: &str) -> Option<&str> {
    let address = address.trim_matches('"');

    let address = match address.strip_prefix('[') {
        Some(bracketed) => bracketed.split(']').next().unwrap_or(bracketed),
        // Only IPv4 and host names carry a port after a single colon.
        None if address.matches(':').count() == 1 => {
            address.split(':').next().unwrap_or(address)
        }
        None => address,
    };

    (!address.is_empty()).then_some(address)
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_forwarded() {
        assert_eq!(client_ip_from_forwarded("for=1.2.3.4"), Some("1.2.3.4"));
        assert_eq!(
            client_ip_from_forwarded("proto=http;For=1.2.3.4:8080;by=5.6.7.8"),
            Some("1.2.3.4")
        );
        assert_eq!(
            client_ip_from_forwarded("for=\"[::1]:8080\", for=1.2.3.4"),
            Some("::1")
        );
        assert_eq!(client_ip_from_forwarded("for=::1"), Some("::1"));
    }

    #[test]
    fn test_forwarded_missing() {
        assert_eq!(client_ip_from_forwarded(""), None);
        assert_eq!(client_ip_from_forwarded("proto=https"), None);
        assert_eq!(client_ip_from_forwarded("for=;proto=https"), None);
        assert_eq!(client_ip_from_forwarded("for=\"\""), None);
    }

    #[test]
    fn test_forwarded_for() {
        assert_eq!(
            client_ip_from_forwarded_for("1.2.3.4, 5.6.7.8"),
            Some("1.2.3.4")
        );
        assert_eq!(client_ip_from_forwarded_for(" ::1 "), Some("::1"));
        assert_eq!(client_ip_from_forwarded_for(""), None);
        assert_eq!(client_ip_from_forwarded_for(", 1.2.3.4"), None);
    }
}
