//! Types for building semantic-convention attribute sets.
//!
//! Attributes are typed name/value facts attached to a traced operation or a metric data point.
//! This crate defines the three pieces every extractor works with:
//!
//!  - [`AttributeValue`]: the boxed value of an attribute, one of the scalar kinds or a
//!    homogeneous array of them.
//!  - [`AttributeKey`]: a name bound to a value type at compile time, so that a key declared as an
//!    integer can never receive a string.
//!  - [`Attributes`]: the ordered, append-only sink an extractor writes into for the duration of
//!    one operation.
//!
//! # Example
//!
//! ```
//! use semattr_protocol::{AttributeKey, Attributes};
//!
//! const HTTP_METHOD: AttributeKey<String> = AttributeKey::new("http.method");
//! const HTTP_STATUS_CODE: AttributeKey<i64> = AttributeKey::new("http.status_code");
//!
//! let mut attributes = Attributes::new();
//! attributes.insert(&HTTP_METHOD, "GET".to_owned());
//! attributes.insert_opt(&HTTP_STATUS_CODE, None);
//!
//! assert_eq!(attributes.len(), 1);
//! assert_eq!(attributes.get_value("http.method").and_then(|v| v.as_str()), Some("GET"));
//! ```

#![warn(missing_docs)]

mod attributes;
mod key;
mod value;

pub use self::attributes::*;
pub use self::key::*;
pub use self::value::*;
