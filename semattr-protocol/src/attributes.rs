use indexmap::IndexMap;
use serde::Serialize;

use crate::{AttributeKey, AttributeType, AttributeValue};

/// The attribute sink of a single operation.
///
/// Entries keep the order in which their key was first written. Writing a key again replaces the
/// value in place, so the last write wins. Entries are never removed.
///
/// An instance is owned by exactly one in-flight operation. Extractors only append to it and never
/// read it back.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, AttributeValue>);

impl Attributes {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` under `key`, replacing any previous value of that key.
    pub fn insert<T: AttributeType>(&mut self, key: &AttributeKey<T>, value: T) {
        self.insert_raw(key.name(), value.into());
    }

    /// Writes `value` under `key` if it is `Some`.
    ///
    /// Nothing is written for `None`, so an unknown field never shows up as an empty attribute.
    pub fn insert_opt<T: AttributeType>(&mut self, key: &AttributeKey<T>, value: Option<T>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Writes an untyped value.
    ///
    /// Prefer [`insert`](Self::insert) with a typed key wherever the key is known statically.
    pub fn insert_raw(&mut self, name: &str, value: AttributeValue) {
        match self.0.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.0.insert(name.to_owned(), value);
            }
        }
    }

    /// Returns the value stored under `key`.
    pub fn get<T: AttributeType>(&self, key: &AttributeKey<T>) -> Option<&AttributeValue> {
        self.get_value(key.name())
    }

    /// Returns the value stored under the attribute `name`.
    pub fn get_value(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// Returns `true` if a value is stored under the attribute `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no attribute has been written.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over names and values in write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    const METHOD: AttributeKey<String> = AttributeKey::new("http.method");
    const STATUS: AttributeKey<i64> = AttributeKey::new("http.status_code");
    const HEADER: AttributeKey<Vec<String>> = AttributeKey::new("http.request.header.x_trace");

    #[test]
    fn test_last_write_wins_in_place() {
        let mut attributes = Attributes::new();
        attributes.insert(&METHOD, "GET".to_owned());
        attributes.insert(&STATUS, 500);
        attributes.insert(&METHOD, "POST".to_owned());

        let names: Vec<_> = attributes.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["http.method", "http.status_code"]);
        assert_eq!(
            attributes.get(&METHOD),
            Some(&AttributeValue::String("POST".to_owned()))
        );
    }

    #[test]
    fn test_insert_opt_none_writes_nothing() {
        let mut attributes = Attributes::new();
        attributes.insert_opt(&STATUS, None);
        assert!(attributes.is_empty());
        assert!(!attributes.contains_key("http.status_code"));
    }

    #[test]
    fn test_serialize_in_write_order() {
        let mut attributes = Attributes::new();
        attributes.insert(&STATUS, 200);
        attributes.insert(&METHOD, "GET".to_owned());
        attributes.insert(&HEADER, vec!["a".to_owned(), "b".to_owned()]);

        insta::assert_json_snapshot!(attributes, @r###"
        {
          "http.status_code": 200,
          "http.method": "GET",
          "http.request.header.x_trace": [
            "a",
            "b"
          ]
        }
        "###);
    }
}
