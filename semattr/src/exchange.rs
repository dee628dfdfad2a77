use std::error::Error;
use std::str::FromStr;

use clap::ValueEnum;
use semattr_http::{
    HttpClientAttributesGetter, HttpCommonAttributesGetter, HttpServerAttributesGetter,
};

/// A header given on the command line as `Name: value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl FromStr for Header {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, value)) = s.split_once(':') else {
            return Err(format!("expected `Name: value`, got `{s}`"));
        };

        let name = name.trim();
        if name.is_empty() {
            return Err("header name must not be empty".to_owned());
        }

        Ok(Self {
            name: name.to_owned(),
            value: value.trim().to_owned(),
        })
    }
}

fn header_values(headers: &[Header], name: &str) -> Vec<String> {
    headers
        .iter()
        .filter(|header| header.name.eq_ignore_ascii_case(name))
        .map(|header| header.value.clone())
        .collect()
}

/// The way an exchange failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, thiserror::Error)]
pub enum ExchangeError {
    /// The connection could not be established.
    #[error("connection refused")]
    Connect,
    /// No response arrived in time.
    #[error("request timed out")]
    Timeout,
}

impl ExchangeError {
    fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
        }
    }
}

/// An HTTP request described on the command line.
#[derive(Clone, Debug, Default)]
pub struct Request {
    pub method: Option<String>,
    pub url: Option<String>,
    pub target: Option<String>,
    pub scheme: Option<String>,
    pub route: Option<String>,
    pub flavor: Option<String>,
    pub headers: Vec<Header>,
    pub content_length: Option<i64>,
}

/// An HTTP response described on the command line.
#[derive(Clone, Debug, Default)]
pub struct Response {
    pub status: u16,
    pub flavor: Option<String>,
    pub headers: Vec<Header>,
    pub content_length: Option<i64>,
}

/// Reads attributes off [`Request`] and [`Response`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ExchangeGetter;

impl HttpCommonAttributesGetter for ExchangeGetter {
    type Request = Request;
    type Response = Response;

    fn method(&self, request: &Request) -> Option<String> {
        request.method.clone()
    }

    fn request_header(&self, request: &Request, name: &str) -> Vec<String> {
        header_values(&request.headers, name)
    }

    fn request_content_length(
        &self,
        request: &Request,
        _response: Option<&Response>,
    ) -> Option<i64> {
        request.content_length
    }

    fn status_code(
        &self,
        _request: &Request,
        response: Option<&Response>,
        _error: Option<&(dyn Error + 'static)>,
    ) -> Option<u16> {
        response.map(|response| response.status)
    }

    fn response_content_length(&self, _request: &Request, response: &Response) -> Option<i64> {
        response.content_length
    }

    fn response_header(&self, response: &Response, name: &str) -> Vec<String> {
        header_values(&response.headers, name)
    }

    fn error_type(&self, error: &(dyn Error + 'static)) -> Option<String> {
        error
            .downcast_ref::<ExchangeError>()
            .map(|error| error.as_str().to_owned())
    }
}

impl HttpClientAttributesGetter for ExchangeGetter {
    fn url(&self, request: &Request) -> Option<String> {
        request.url.clone()
    }

    fn flavor(&self, request: &Request, response: Option<&Response>) -> Option<String> {
        response
            .and_then(|response| response.flavor.clone())
            .or_else(|| request.flavor.clone())
    }
}

impl HttpServerAttributesGetter for ExchangeGetter {
    fn flavor(&self, request: &Request) -> Option<String> {
        request.flavor.clone()
    }

    fn target(&self, request: &Request) -> Option<String> {
        request.target.clone()
    }

    fn route(&self, request: &Request) -> Option<String> {
        request.route.clone()
    }

    fn scheme(&self, request: &Request) -> Option<String> {
        request.scheme.clone()
    }
}

#[cfg(test)]
mod tests {
    use semattr_http::{AttributesExtractor, HttpClientAttributesExtractor};
    use semattr_protocol::Attributes;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_parse_header() {
        let header: Header = "X-Trace:  abc:def ".parse().unwrap();
        assert_eq!(header.name, "X-Trace");
        assert_eq!(header.value, "abc:def");

        assert!("no-colon".parse::<Header>().is_err());
        assert!(": value".parse::<Header>().is_err());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let headers = vec![
            "Accept: text/html".parse().unwrap(),
            "accept: application/json".parse().unwrap(),
            "Host: example.com".parse().unwrap(),
        ];

        assert_eq!(
            header_values(&headers, "accept"),
            ["text/html", "application/json"]
        );
        assert!(header_values(&headers, "x-missing").is_empty());
    }

    #[test]
    fn test_client_flavor_prefers_response() {
        let request = Request {
            flavor: Some("1.1".to_owned()),
            ..Default::default()
        };
        let response = Response {
            flavor: Some("2.0".to_owned()),
            ..Default::default()
        };

        let getter = ExchangeGetter;
        let flavor = HttpClientAttributesGetter::flavor(&getter, &request, Some(&response));
        assert_eq!(flavor.as_deref(), Some("2.0"));

        let flavor = HttpClientAttributesGetter::flavor(&getter, &request, None);
        assert_eq!(flavor.as_deref(), Some("1.1"));
    }

    #[test]
    fn test_error_type() {
        let extractor = HttpClientAttributesExtractor::create(ExchangeGetter);
        let request = Request::default();

        let mut attributes = Attributes::new();
        extractor.on_end(
            &mut attributes,
            &(),
            &request,
            None,
            Some(&ExchangeError::Timeout),
        );

        insta::assert_json_snapshot!(attributes, @r###"
        {
          "error.type": "timeout"
        }
        "###);
    }
}
