use std::fmt;

/// The span-kind slot an operation occupies in its parent context.
///
/// Span correlation outside of this crate uses the key to suppress nested spans of the same kind,
/// for instance a client span created by a library that is wrapped by another instrumented
/// client. The extractors only report the key, they never create spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpanKey {
    /// An outgoing HTTP request.
    HttpClient,
    /// An incoming HTTP request.
    HttpServer,
}

impl SpanKey {
    /// Returns the string representation of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HttpClient => "http-client",
            Self::HttpServer => "http-server",
        }
    }
}

impl fmt::Display for SpanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by extractors whose operations occupy a [`SpanKey`] slot.
pub trait SpanKeyProvider {
    /// Returns the slot of operations observed by this extractor.
    fn span_key(&self) -> SpanKey;
}
