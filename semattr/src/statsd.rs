use semattr_statsd::CounterMetric;

/// Counter metrics emitted by the command line tool.
pub enum SemattrCounters {
    /// Number of URLs passed through the sanitizer.
    ///
    /// This metric is tagged with:
    ///  - `redacted`: `"true"` if credentials were removed from the URL.
    UrlSanitized,
    /// Number of exchanges attributes were extracted for.
    ///
    /// This metric is tagged with:
    ///  - `span_key`: `"http-client"` or `"http-server"`.
    Extraction,
}

impl CounterMetric for SemattrCounters {
    fn name(&self) -> &'static str {
        match self {
            Self::UrlSanitized => "url.sanitized",
            Self::Extraction => "extraction",
        }
    }
}
