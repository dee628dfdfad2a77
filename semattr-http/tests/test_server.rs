use std::error::Error;

use semattr_http::{
    AttributesExtractor, HttpCommonAttributesGetter, HttpServerAttributesExtractor,
    HttpServerAttributesGetter, SpanKey, SpanKeyProvider,
};
use semattr_protocol::{AttributeValue, Attributes};
use similar_asserts::assert_eq;

#[derive(Debug, Default)]
struct Request {
    path: &'static str,
    headers: Vec<(&'static str, &'static str)>,
    route: std::cell::Cell<Option<&'static str>>,
    body_size: Option<i64>,
}

#[derive(Debug)]
struct Response {
    status: u16,
    headers: Vec<(&'static str, &'static str)>,
}

fn header(headers: &[(&'static str, &'static str)], name: &str) -> Vec<String> {
    headers
        .iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| (*value).to_owned())
        .collect()
}

#[derive(Clone, Debug)]
struct Getter;

impl HttpCommonAttributesGetter for Getter {
    type Request = Request;
    type Response = Response;

    fn method(&self, _request: &Request) -> Option<String> {
        Some("GET".to_owned())
    }

    fn request_header(&self, request: &Request, name: &str) -> Vec<String> {
        header(&request.headers, name)
    }

    fn request_content_length(
        &self,
        request: &Request,
        _response: Option<&Response>,
    ) -> Option<i64> {
        request.body_size
    }

    fn status_code(
        &self,
        _request: &Request,
        response: Option<&Response>,
        _error: Option<&(dyn Error + 'static)>,
    ) -> Option<u16> {
        response.map(|response| response.status)
    }

    fn response_header(&self, response: &Response, name: &str) -> Vec<String> {
        header(&response.headers, name)
    }
}

impl HttpServerAttributesGetter for Getter {
    fn flavor(&self, _request: &Request) -> Option<String> {
        Some(semattr_conventions::http_flavor::HTTP_1_1.to_owned())
    }

    fn target(&self, request: &Request) -> Option<String> {
        Some(request.path.to_owned())
    }

    fn route(&self, request: &Request) -> Option<String> {
        request.route.get().map(str::to_owned)
    }

    fn scheme(&self, _request: &Request) -> Option<String> {
        Some("https".to_owned())
    }
}

fn request(headers: Vec<(&'static str, &'static str)>) -> Request {
    Request {
        path: "/users/42?expand=1",
        headers,
        ..Default::default()
    }
}

fn string(value: &str) -> Option<AttributeValue> {
    Some(AttributeValue::String(value.to_owned()))
}

#[test]
fn test_server_attributes() {
    let extractor = HttpServerAttributesExtractor::builder(Getter)
        .capture_request_headers(["x-request-id"])
        .capture_response_headers(["X-Cache"])
        .build();

    let mut request = request(vec![
        ("User-Agent", "curl/8.0"),
        ("X-Request-Id", "abc"),
        ("X-Forwarded-For", "10.0.0.1, 10.0.0.2"),
    ]);
    request.body_size = Some(7);
    let response = Response {
        status: 404,
        headers: vec![("x-cache", "MISS"), ("X-Cache", "HIT")],
    };

    let mut attributes = Attributes::new();
    extractor.on_start(&mut attributes, &(), &request);
    extractor.on_end(&mut attributes, &(), &request, Some(&response), None);

    insta::assert_json_snapshot!(attributes, @r#"
    {
      "http.method": "GET",
      "http.user_agent": "curl/8.0",
      "http.request.header.x_request_id": [
        "abc"
      ],
      "http.flavor": "1.1",
      "http.scheme": "https",
      "http.target": "/users/42?expand=1",
      "http.client_ip": "10.0.0.1",
      "http.request_content_length": 7,
      "http.status_code": 404,
      "http.response.header.x_cache": [
        "MISS",
        "HIT"
      ]
    }
    "#);
}

#[test]
fn test_route_known_after_dispatch() {
    let extractor = HttpServerAttributesExtractor::create(Getter);
    let request = request(Vec::new());

    let mut attributes = Attributes::new();
    extractor.on_start(&mut attributes, &(), &request);
    assert!(!attributes.contains_key("http.route"));

    request.route.set(Some("/users/:id"));
    extractor.on_end(&mut attributes, &(), &request, None, None);
    assert_eq!(attributes.get_value("http.route").cloned(), string("/users/:id"));
}

#[test]
fn test_client_ip_prefers_forwarded() {
    let extractor = HttpServerAttributesExtractor::create(Getter);
    let request = request(vec![
        ("X-Forwarded-For", "10.0.0.1"),
        ("Forwarded", "proto=https;for=\"[2001:db8::1]:4711\""),
    ]);

    let mut attributes = Attributes::new();
    extractor.on_start(&mut attributes, &(), &request);

    assert_eq!(
        attributes.get_value("http.client_ip").cloned(),
        string("2001:db8::1")
    );
}

#[test]
fn test_client_ip_falls_back_to_forwarded_for() {
    let extractor = HttpServerAttributesExtractor::create(Getter);
    let request = request(vec![
        ("Forwarded", "proto=https"),
        ("X-Forwarded-For", "192.168.0.1"),
    ]);

    let mut attributes = Attributes::new();
    extractor.on_start(&mut attributes, &(), &request);

    assert_eq!(
        attributes.get_value("http.client_ip").cloned(),
        string("192.168.0.1")
    );
}

#[test]
fn test_client_ip_absent() {
    let extractor = HttpServerAttributesExtractor::create(Getter);
    let request = request(Vec::new());

    let mut attributes = Attributes::new();
    extractor.on_start(&mut attributes, &(), &request);

    assert!(!attributes.contains_key("http.client_ip"));
}

#[test]
fn test_span_key() {
    let extractor = HttpServerAttributesExtractor::create(Getter);
    assert_eq!(extractor.span_key(), SpanKey::HttpServer);
    assert_eq!(extractor.span_key().to_string(), "http-server");
}
