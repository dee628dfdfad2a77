use std::error::Error;

/// Reads the fields shared by HTTP clients and servers off a request/response pair.
///
/// Implemented once per integrated library. Every method may report a field as unknown by
/// returning `None` or an empty list; the extractor then omits the attribute and never fails.
pub trait HttpCommonAttributesGetter {
    /// The request type of the integrated library.
    type Request;
    /// The response type of the integrated library.
    type Response;

    /// Returns the request method, e.g. `GET`.
    fn method(&self, request: &Self::Request) -> Option<String>;

    /// Returns all values of the request header `name`.
    ///
    /// `name` is lowercase. Lookups should be case-insensitive. Returns an empty list if the
    /// header is absent.
    fn request_header(&self, request: &Self::Request, name: &str) -> Vec<String>;

    /// Returns the size of the request body in bytes.
    fn request_content_length(
        &self,
        request: &Self::Request,
        response: Option<&Self::Response>,
    ) -> Option<i64> {
        let _ = (request, response);
        None
    }

    /// Returns the status code of the response.
    ///
    /// Called even if there is no response, since some libraries attach the status code to the
    /// error they raise.
    fn status_code(
        &self,
        request: &Self::Request,
        response: Option<&Self::Response>,
        error: Option<&(dyn Error + 'static)>,
    ) -> Option<u16>;

    /// Returns the size of the response body in bytes.
    fn response_content_length(
        &self,
        request: &Self::Request,
        response: &Self::Response,
    ) -> Option<i64> {
        let _ = (request, response);
        None
    }

    /// Returns all values of the response header `name`.
    ///
    /// `name` is lowercase. Returns an empty list if the header is absent.
    fn response_header(&self, response: &Self::Response, name: &str) -> Vec<String>;

    /// Classifies the error an operation ended with, e.g. by its type name.
    fn error_type(&self, error: &(dyn Error + 'static)) -> Option<String> {
        let _ = error;
        None
    }
}

/// Reads the fields of an outgoing HTTP request.
pub trait HttpClientAttributesGetter: HttpCommonAttributesGetter {
    /// Returns the full request URL.
    ///
    /// The URL may contain credentials. They are removed before the URL is recorded.
    fn url(&self, request: &Self::Request) -> Option<String>;

    /// Returns the protocol flavor, see [`http_flavor`](semattr_conventions::http_flavor).
    ///
    /// Receives the response as well, since often only the response reveals the negotiated
    /// protocol. Implementations should prefer the response when both sides report a flavor.
    fn flavor(&self, request: &Self::Request, response: Option<&Self::Response>) -> Option<String>;
}

/// Reads the fields of an incoming HTTP request.
pub trait HttpServerAttributesGetter: HttpCommonAttributesGetter {
    /// Returns the protocol flavor, see [`http_flavor`](semattr_conventions::http_flavor).
    fn flavor(&self, request: &Self::Request) -> Option<String>;

    /// Returns the request target, i.e. path and query.
    fn target(&self, request: &Self::Request) -> Option<String>;

    /// Returns the route template the request matched, e.g. `/users/:id`.
    fn route(&self, request: &Self::Request) -> Option<String> {
        let _ = request;
        None
    }

    /// Returns the URI scheme, e.g. `https`.
    fn scheme(&self, request: &Self::Request) -> Option<String>;
}
