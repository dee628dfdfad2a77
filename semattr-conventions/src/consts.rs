use semattr_protocol::AttributeKey;

macro_rules! convention_attributes {
    ($($(#[$meta:meta])* $name:ident: $ty:ty => $attr:literal,)*) => {
        $(
            $(#[$meta])*
            pub const $name: AttributeKey<$ty> = AttributeKey::new($attr);
        )*

        /// Names of all attributes in the fixed vocabulary.
        pub const ALL_NAMES: &[&str] = &[$($attr,)*];
    };
}

convention_attributes!(
    /// HTTP request method, e.g. `GET`.
    HTTP_METHOD: String => "http.method",
    /// Full request URL with credentials removed.
    HTTP_URL: String => "http.url",
    /// Kind of HTTP protocol used, see [`http_flavor`](crate::http_flavor).
    HTTP_FLAVOR: String => "http.flavor",
    /// HTTP response status code.
    HTTP_STATUS_CODE: i64 => "http.status_code",
    /// Value of the `User-Agent` request header.
    HTTP_USER_AGENT: String => "http.user_agent",
    /// Size of the request payload body in bytes.
    HTTP_REQUEST_CONTENT_LENGTH: i64 => "http.request_content_length",
    /// Size of the response payload body in bytes.
    HTTP_RESPONSE_CONTENT_LENGTH: i64 => "http.response_content_length",
    /// URI scheme of the request, server side.
    HTTP_SCHEME: String => "http.scheme",
    /// Request target (path and query), server side.
    HTTP_TARGET: String => "http.target",
    /// Matched route template, server side.
    HTTP_ROUTE: String => "http.route",
    /// Address of the original client, derived from forwarding headers.
    HTTP_CLIENT_IP: String => "http.client_ip",
    /// Classification of the error an operation ended with.
    ERROR_TYPE: String => "error.type",
    /// Name of a memory pool on runtime memory metrics.
    POOL: String => "pool",
    /// Memory type (`heap` or `non_heap`) on runtime memory metrics.
    TYPE: String => "type",
);
