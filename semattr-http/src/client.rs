use std::error::Error;

use semattr_conventions as conventions;
use semattr_protocol::Attributes;

use crate::common::HttpCommonAttributesExtractor;
use crate::{
    AttributesExtractor, HttpClientAttributesExtractorBuilder, HttpClientAttributesGetter,
    SpanKey, SpanKeyProvider, sanitize_url,
};

/// Extracts HTTP client attributes of outgoing requests.
///
/// Besides the attributes shared with servers, records the request URL with credentials removed
/// on start, and the protocol flavor on end.
///
/// The extractor is immutable once built and can be shared across any number of concurrent
/// operations.
#[derive(Clone, Debug)]
pub struct HttpClientAttributesExtractor<G> {
    common: HttpCommonAttributesExtractor<G>,
}

impl<G> HttpClientAttributesExtractor<G>
where
    G: HttpClientAttributesGetter,
{
    /// Creates an extractor that does not capture any headers.
    pub fn create(getter: G) -> Self {
        Self::builder(getter).build()
    }

    /// Returns a builder to configure header capture.
    pub fn builder(getter: G) -> HttpClientAttributesExtractorBuilder<G> {
        HttpClientAttributesExtractorBuilder::new(getter)
    }

    pub(crate) fn new(common: HttpCommonAttributesExtractor<G>) -> Self {
        Self { common }
    }

    /// Returns the normalized names of captured request headers.
    pub fn captured_request_headers(&self) -> impl ExactSizeIterator<Item = &str> {
        self.common.request_headers.names()
    }

    /// Returns the normalized names of captured response headers.
    pub fn captured_response_headers(&self) -> impl ExactSizeIterator<Item = &str> {
        self.common.response_headers.names()
    }
}

impl<G, C> AttributesExtractor<C> for HttpClientAttributesExtractor<G>
where
    G: HttpClientAttributesGetter,
    C: ?Sized,
{
    type Request = G::Request;
    type Response = G::Response;

    fn on_start(&self, attributes: &mut Attributes, _parent_context: &C, request: &G::Request) {
        self.common.on_start(attributes, request);

        let url = self.common.getter.url(request);
        let url = url.as_deref().map(|url| sanitize_url(url).into_owned());
        attributes.insert_opt(&conventions::HTTP_URL, url);
    }

    fn on_end(
        &self,
        attributes: &mut Attributes,
        _context: &C,
        request: &G::Request,
        response: Option<&G::Response>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.common.on_end(attributes, request, response, error);

        let flavor = HttpClientAttributesGetter::flavor(&self.common.getter, request, response);
        attributes.insert_opt(&conventions::HTTP_FLAVOR, flavor);
    }
}

impl<G> SpanKeyProvider for HttpClientAttributesExtractor<G> {
    fn span_key(&self) -> SpanKey {
        SpanKey::HttpClient
    }
}
