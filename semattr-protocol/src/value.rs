use std::fmt;

use serde::Serialize;

/// The kind of value an attribute holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// A UTF-8 string.
    String,
    /// A boolean.
    Boolean,
    /// A signed 64-bit integer.
    Integer,
    /// A 64-bit floating point number.
    Double,
    /// An array of strings.
    StringArray,
    /// An array of booleans.
    BooleanArray,
    /// An array of signed 64-bit integers.
    IntegerArray,
    /// An array of 64-bit floating point numbers.
    DoubleArray,
}

impl AttributeKind {
    /// Returns the name of this kind as used in the semantic conventions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::StringArray => "string[]",
            Self::BooleanArray => "boolean[]",
            Self::IntegerArray => "integer[]",
            Self::DoubleArray => "double[]",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of a single attribute.
///
/// Serializes to the bare JSON value, without a type tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string value.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// A signed integer value.
    I64(i64),
    /// A floating point value.
    F64(f64),
    /// A homogeneous array of strings.
    StringArray(Vec<String>),
    /// A homogeneous array of booleans.
    BoolArray(Vec<bool>),
    /// A homogeneous array of signed integers.
    I64Array(Vec<i64>),
    /// A homogeneous array of floating point values.
    F64Array(Vec<f64>),
}

impl AttributeValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::String(_) => AttributeKind::String,
            Self::Bool(_) => AttributeKind::Boolean,
            Self::I64(_) => AttributeKind::Integer,
            Self::F64(_) => AttributeKind::Double,
            Self::StringArray(_) => AttributeKind::StringArray,
            Self::BoolArray(_) => AttributeKind::BooleanArray,
            Self::I64Array(_) => AttributeKind::IntegerArray,
            Self::F64Array(_) => AttributeKind::DoubleArray,
        }
    }

    /// Returns the string if this value is a string, otherwise `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the integer if this value is an integer, otherwise `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the strings if this value is a string array, otherwise `None`.
    pub fn as_str_array(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}

/// Renders scalars plainly and arrays as a comma separated list.
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
            for (index, value) in values.iter().enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{value}")?;
            }
            Ok(())
        }

        match self {
            Self::String(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
            Self::I64(value) => write!(f, "{value}"),
            Self::F64(value) => write!(f, "{value}"),
            Self::StringArray(values) => join(f, values),
            Self::BoolArray(values) => join(f, values),
            Self::I64Array(values) => join(f, values),
            Self::F64Array(values) => join(f, values),
        }
    }
}

/// A Rust type that can be stored as the value of an attribute.
///
/// Implemented for the scalar types and vectors of them. The associated [`KIND`](Self::KIND)
/// is what ties an [`AttributeKey`](crate::AttributeKey) to its value type.
pub trait AttributeType: Into<AttributeValue> {
    /// The kind of attribute value this type produces.
    const KIND: AttributeKind;
}

macro_rules! attribute_type {
    ($ty:ty => $kind:ident, $variant:ident) => {
        impl AttributeType for $ty {
            const KIND: AttributeKind = AttributeKind::$kind;
        }

        impl From<$ty> for AttributeValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

attribute_type!(String => String, String);
attribute_type!(bool => Boolean, Bool);
attribute_type!(i64 => Integer, I64);
attribute_type!(f64 => Double, F64);
attribute_type!(Vec<String> => StringArray, StringArray);
attribute_type!(Vec<bool> => BooleanArray, BoolArray);
attribute_type!(Vec<i64> => IntegerArray, I64Array);
attribute_type!(Vec<f64> => DoubleArray, F64Array);

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(AttributeValue::from(1i64).kind(), i64::KIND);
        assert_eq!(AttributeValue::from(true).kind(), bool::KIND);
        assert_eq!(AttributeValue::from(0.5f64).kind(), f64::KIND);
        assert_eq!(AttributeValue::from("x").kind(), String::KIND);
        assert_eq!(
            AttributeValue::from(vec!["a".to_owned()]).kind(),
            <Vec<String>>::KIND
        );
        assert_eq!(AttributeValue::from(vec![1i64]).kind(), <Vec<i64>>::KIND);
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::from("heap").to_string(), "heap");
        assert_eq!(AttributeValue::from(42i64).to_string(), "42");
        assert_eq!(
            AttributeValue::from(vec!["a".to_owned(), "b".to_owned()]).to_string(),
            "a,b"
        );
    }

    #[test]
    fn test_serialize_untagged() {
        let value = AttributeValue::from(vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"["a","b"]"#);
        assert_eq!(
            serde_json::to_string(&AttributeValue::I64(200)).unwrap(),
            "200"
        );
    }
}
