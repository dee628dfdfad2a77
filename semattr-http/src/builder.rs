use crate::common::{CapturedHeaders, HttpCommonAttributesExtractor};
use crate::{
    HttpClientAttributesExtractor, HttpClientAttributesGetter, HttpServerAttributesExtractor,
    HttpServerAttributesGetter,
};

/// Header names as passed by the caller, before normalization.
#[derive(Clone, Debug, Default)]
struct HeaderNames {
    request: Vec<String>,
    response: Vec<String>,
}

impl HeaderNames {
    fn into_extractor<G>(self, getter: G) -> HttpCommonAttributesExtractor<G> {
        HttpCommonAttributesExtractor {
            getter,
            request_headers: CapturedHeaders::request(self.request),
            response_headers: CapturedHeaders::response(self.response),
        }
    }
}

fn collect_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Configures an [`HttpClientAttributesExtractor`].
///
/// Header names are matched case-insensitively. Any string is accepted as a header name.
/// Duplicates are removed when the extractor is built, keeping the first occurrence.
#[derive(Clone, Debug)]
pub struct HttpClientAttributesExtractorBuilder<G> {
    getter: G,
    headers: HeaderNames,
}

impl<G> HttpClientAttributesExtractorBuilder<G>
where
    G: HttpClientAttributesGetter,
{
    pub(crate) fn new(getter: G) -> Self {
        Self {
            getter,
            headers: HeaderNames::default(),
        }
    }

    /// Sets the request headers to capture, replacing any previously configured list.
    ///
    /// Values of each header are recorded under `http.request.header.<name>`, where `<name>` is
    /// the lowercase header name with every non-alphanumeric character replaced by `_`.
    pub fn capture_request_headers<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.headers.request = collect_names(names);
        self
    }

    /// Sets the response headers to capture, replacing any previously configured list.
    ///
    /// Values are recorded under `http.response.header.<name>`.
    pub fn capture_response_headers<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.headers.response = collect_names(names);
        self
    }

    /// Normalizes the header lists and returns the immutable extractor.
    pub fn build(self) -> HttpClientAttributesExtractor<G> {
        HttpClientAttributesExtractor::new(self.headers.into_extractor(self.getter))
    }
}

/// Configures an [`HttpServerAttributesExtractor`].
///
/// Header capture works the same as for [`HttpClientAttributesExtractorBuilder`].
#[derive(Clone, Debug)]
pub struct HttpServerAttributesExtractorBuilder<G> {
    getter: G,
    headers: HeaderNames,
}

impl<G> HttpServerAttributesExtractorBuilder<G>
where
    G: HttpServerAttributesGetter,
{
    pub(crate) fn new(getter: G) -> Self {
        Self {
            getter,
            headers: HeaderNames::default(),
        }
    }

    /// Sets the request headers to capture, replacing any previously configured list.
    pub fn capture_request_headers<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.headers.request = collect_names(names);
        self
    }

    /// Sets the response headers to capture, replacing any previously configured list.
    pub fn capture_response_headers<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.headers.response = collect_names(names);
        self
    }

    /// Normalizes the header lists and returns the immutable extractor.
    pub fn build(self) -> HttpServerAttributesExtractor<G> {
        HttpServerAttributesExtractor::new(self.headers.into_extractor(self.getter))
    }
}
