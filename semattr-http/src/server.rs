use std::error::Error;

use semattr_conventions as conventions;
use semattr_protocol::Attributes;

use crate::common::HttpCommonAttributesExtractor;
use crate::forwarded;
use crate::{
    AttributesExtractor, HttpServerAttributesExtractorBuilder, HttpServerAttributesGetter,
    SpanKey, SpanKeyProvider,
};

/// Extracts HTTP server attributes of incoming requests.
///
/// Besides the attributes shared with clients, records flavor, scheme, target, route and the
/// client address on start. The client address is taken from the `Forwarded` header, or from the
/// first entry of `X-Forwarded-For` if the former has none.
///
/// The route is read again on end, since it is often only known once the request was dispatched
/// to a handler.
#[derive(Clone, Debug)]
pub struct HttpServerAttributesExtractor<G> {
    common: HttpCommonAttributesExtractor<G>,
}

impl<G> HttpServerAttributesExtractor<G>
where
    G: HttpServerAttributesGetter,
{
    /// Creates an extractor that does not capture any headers.
    pub fn create(getter: G) -> Self {
        Self::builder(getter).build()
    }

    /// Returns a builder to configure header capture.
    pub fn builder(getter: G) -> HttpServerAttributesExtractorBuilder<G> {
        HttpServerAttributesExtractorBuilder::new(getter)
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

    fn client_ip(&self, request: &G::Request) -> Option<String> {
        let getter = &self.common.getter;

        let forwarded = getter.request_header(request, "forwarded");
        if let Some(ip) = forwarded
            .iter()
            .find_map(|value| forwarded::client_ip_from_forwarded(value))
        {
            return Some(ip.to_owned());
        }

        let forwarded_for = getter.request_header(request, "x-forwarded-for");
        forwarded_for
            .first()
            .and_then(|value| forwarded::client_ip_from_forwarded_for(value))
            .map(str::to_owned)
    }
}

impl<G, C> AttributesExtractor<C> for HttpServerAttributesExtractor<G>
where
    G: HttpServerAttributesGetter,
    C: ?Sized,
{
    type Request = G::Request;
    type Response = G::Response;

    fn on_start(&self, attributes: &mut Attributes, _parent_context: &C, request: &G::Request) {
        self.common.on_start(attributes, request);

        let getter = &self.common.getter;
        let flavor = HttpServerAttributesGetter::flavor(getter, request);
        attributes.insert_opt(&conventions::HTTP_FLAVOR, flavor);
        attributes.insert_opt(&conventions::HTTP_SCHEME, getter.scheme(request));
        attributes.insert_opt(&conventions::HTTP_TARGET, getter.target(request));
        attributes.insert_opt(&conventions::HTTP_ROUTE, getter.route(request));
        attributes.insert_opt(&conventions::HTTP_CLIENT_IP, self.client_ip(request));
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

        let route = self.common.getter.route(request);
        attributes.insert_opt(&conventions::HTTP_ROUTE, route);
    }
}

impl<G> SpanKeyProvider for HttpServerAttributesExtractor<G> {
    fn span_key(&self) -> SpanKey {
        SpanKey::HttpServer
    }
}
