//! Logging facade for semattr.
//!
//! # Setup
//!
//! To enable logging, invoke the [`init`] function with a [`LogConfig`]. The configuration
//! implements `serde` traits, so it can be obtained from configuration files. Setup requires the
//! `init` feature.
//!
//! ```
//! # #[cfg(feature = "init")] {
//! use semattr_log::{LogConfig, LogFormat};
//!
//! let log_config = LogConfig {
//!     format: LogFormat::Simplified,
//!     ..LogConfig::default()
//! };
//!
//! semattr_log::init(&log_config);
//! # }
//! ```
//!
//! # Logging
//!
//! Logging goes through the five macros [`error!`], [`warn!`], [`info!`], [`debug!`] and
//! [`trace!`], re-exported from `tracing`. `error!` represents the highest-priority log messages
//! and `trace!` the lowest.
//!
//! ## Conventions
//!
//! Log messages should start lowercase and end without punctuation. Prefer short and precise log
//! messages over verbose text, and structured fields over interpolation. Choose the log level
//! according to these rules:
//!
//! - [`error!`] for bugs and invalid behavior.
//! - [`warn!`] for undesirable behavior.
//! - [`info!`] for messages relevant to the average user.
//! - [`debug!`] for messages usually relevant to debugging.
//! - [`trace!`] for full auxiliary information.
//!
//! Attribute extraction runs on the hot path of every observed operation and does not log.
//!
//! ## Logging Error Types
//!
//! To log errors with all their causes, use the [`LogError`] wrapper:
//!
//! ```
//! use semattr_log::LogError;
//!
//! let custom_error = std::io::Error::other("oh no!");
//! semattr_log::error!("operation failed: {}", LogError(&custom_error));
//! ```
//!
//! # Testing
//!
//! For unit testing, there is a separate initialization macro [`init_test!`] that should be called
//! at the beginning of test method. It requires the `test` feature and enables all log levels for
//! the calling crate.
//!
//! ```
//! # #[cfg(feature = "test")]
//! #[test]
//! fn test_something() {
//!     semattr_log::init_test!();
//! }
//! ```

#![warn(missing_docs)]

#[cfg(feature = "init")]
mod setup;
#[cfg(feature = "init")]
pub use setup::*;

#[cfg(feature = "test")]
pub use test::*;

mod utils;
pub use utils::*;

// Expose the minimal log facade.
#[doc(inline)]
pub use tracing::{debug, error, info, trace, warn};
