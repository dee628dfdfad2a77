//! Configuration for the semattr command-line tool.
//!
//! Configuration is loaded from a directory containing a `config.yml` file. All sections are
//! optional and fall back to their defaults:
//!
//! ```yaml
//! logging:
//!   level: debug
//!   format: json
//! metrics:
//!   statsd: 127.0.0.1:8125
//!   prefix: semattr
//! http:
//!   client:
//!     request_headers: [x-request-id]
//!   server:
//!     response_headers: [x-cache]
//! ```
//!
//! The header lists are passed verbatim to the extractor builders in `semattr-http`, which
//! normalize them.

#![warn(missing_docs)]

mod config;

pub use crate::config::*;
