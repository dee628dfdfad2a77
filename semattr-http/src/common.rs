use std::error::Error;

use semattr_conventions as conventions;
use semattr_protocol::{AttributeKey, Attributes};

use crate::HttpCommonAttributesGetter;

/// Header whose first value is recorded as [`HTTP_USER_AGENT`](conventions::HTTP_USER_AGENT).
const USER_AGENT: &str = "user-agent";

/// Normalized list of headers captured in one direction.
///
/// Each entry pairs the lowercase header name passed to the getter with the precomputed attribute
/// key the values are written under.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CapturedHeaders {
    headers: Vec<(String, AttributeKey<Vec<String>>)>,
}

impl CapturedHeaders {
    /// Normalizes request header names.
    pub fn request(names: Vec<String>) -> Self {
        Self::normalize(names, conventions::request_header_key)
    }

    /// Normalizes response header names.
    pub fn response(names: Vec<String>) -> Self {
        Self::normalize(names, conventions::response_header_key)
    }

    /// Lowercases names and removes duplicates, keeping the first occurrence.
    ///
    /// Distinct names can map to the same attribute key, e.g. `x-trace` and `x_trace`. Only the
    /// first of them is captured, so that one header never overwrites the values of another.
    fn normalize(names: Vec<String>, key_for: fn(&str) -> AttributeKey<Vec<String>>) -> Self {
        let mut headers: Vec<(String, AttributeKey<Vec<String>>)> = Vec::with_capacity(names.len());

        for name in names {
            let name = name.to_lowercase();
            if headers.iter().any(|(existing, _)| *existing == name) {
                continue;
            }

            let key = key_for(&name);
            if let Some((existing, _)) = headers.iter().find(|(_, k)| *k == key) {
                semattr_log::debug!(
                    header = %name,
                    captured = %existing,
                    key = %key,
                    "not capturing header with conflicting attribute key"
                );
                continue;
            }

            headers.push((name, key));
        }

        Self { headers }
    }

    /// Returns the normalized header names in capture order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.headers.iter().map(|(name, _)| name.as_str())
    }

    /// Writes the values of every captured header that has at least one value.
    fn capture<F>(&self, attributes: &mut Attributes, mut values: F)
    where
        F: FnMut(&str) -> Vec<String>,
    {
        for (name, key) in &self.headers {
            let values = values(name);
            if !values.is_empty() {
                attributes.insert(key, values);
            }
        }
    }
}

/// The part of extraction shared by HTTP clients and servers.
#[derive(Clone, Debug)]
pub(crate) struct HttpCommonAttributesExtractor<G> {
    pub getter: G,
    pub request_headers: CapturedHeaders,
    pub response_headers: CapturedHeaders,
}

impl<G> HttpCommonAttributesExtractor<G>
where
    G: HttpCommonAttributesGetter,
{
    pub fn on_start(&self, attributes: &mut Attributes, request: &G::Request) {
        let getter = &self.getter;

        attributes.insert_opt(&conventions::HTTP_METHOD, getter.method(request));

        let user_agent = getter.request_header(request, USER_AGENT).into_iter().next();
        attributes.insert_opt(&conventions::HTTP_USER_AGENT, user_agent);

        self.request_headers
            .capture(attributes, |name| getter.request_header(request, name));
    }

    pub fn on_end(
        &self,
        attributes: &mut Attributes,
        request: &G::Request,
        response: Option<&G::Response>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let getter = &self.getter;

        attributes.insert_opt(
            &conventions::HTTP_REQUEST_CONTENT_LENGTH,
            getter.request_content_length(request, response),
        );

        // The status code can be attached to the error when there is no response.
        let status_code = getter.status_code(request, response, error);
        attributes.insert_opt(&conventions::HTTP_STATUS_CODE, status_code.map(i64::from));

        if let Some(response) = response {
            attributes.insert_opt(
                &conventions::HTTP_RESPONSE_CONTENT_LENGTH,
                getter.response_content_length(request, response),
            );

            self.response_headers
                .capture(attributes, |name| getter.response_header(response, name));
        }

        if let Some(error) = error {
            attributes.insert_opt(&conventions::ERROR_TYPE, getter.error_type(error));
        }
    }
}
