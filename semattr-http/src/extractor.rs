use std::error::Error;

use semattr_protocol::Attributes;

/// Derives attributes of an operation at its start and end.
///
/// `C` is the caller's context handle. Extractors in this crate do not inspect it, but they accept
/// any context so that they can be combined with extractors that do.
///
/// For a single operation, `on_start` is called exactly once, followed by exactly one call to
/// `on_end` with the same attributes sink. Both calls append to the sink and never fail: fields
/// that cannot be resolved are omitted.
pub trait AttributesExtractor<C: ?Sized = ()> {
    /// The request type observed by this extractor.
    type Request;
    /// The response type observed by this extractor.
    type Response;

    /// Writes the attributes available before the operation runs.
    fn on_start(&self, attributes: &mut Attributes, parent_context: &C, request: &Self::Request);

    /// Writes the attributes available after the operation finished.
    ///
    /// `response` is absent if the operation failed before a response existed. `error` is absent
    /// if the operation succeeded. Both or neither being present is tolerated.
    fn on_end(
        &self,
        attributes: &mut Attributes,
        context: &C,
        request: &Self::Request,
        response: Option<&Self::Response>,
        error: Option<&(dyn Error + 'static)>,
    );
}

impl<C, E> AttributesExtractor<C> for &E
where
    C: ?Sized,
    E: AttributesExtractor<C> + ?Sized,
{
    type Request = E::Request;
    type Response = E::Response;

    fn on_start(&self, attributes: &mut Attributes, parent_context: &C, request: &Self::Request) {
        (**self).on_start(attributes, parent_context, request)
    }

    fn on_end(
        &self,
        attributes: &mut Attributes,
        context: &C,
        request: &Self::Request,
        response: Option<&Self::Response>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        (**self).on_end(attributes, context, request, response, error)
    }
}
