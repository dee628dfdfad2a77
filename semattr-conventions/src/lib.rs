//! Semantic-convention attribute names.
//!
//! The key strings in this crate are a compatibility surface: downstream consumers match on them
//! exactly. Changing one of them is a breaking change for every consumer of the emitted spans and
//! metrics.
//!
//! Besides the fixed vocabulary in [`consts`](self), header values are captured under keys
//! synthesized from the header name, see [`request_header_key`] and [`response_header_key`].

#![warn(missing_docs)]

mod consts;
mod header;

pub use self::consts::*;
pub use self::header::*;

/// Values of [`HTTP_FLAVOR`].
pub mod http_flavor {
    /// HTTP/1.0
    pub const HTTP_1_0: &str = "1.0";
    /// HTTP/1.1
    pub const HTTP_1_1: &str = "1.1";
    /// HTTP/2
    pub const HTTP_2_0: &str = "2.0";
    /// SPDY protocol.
    pub const SPDY: &str = "SPDY";
    /// QUIC protocol.
    pub const QUIC: &str = "QUIC";
}
