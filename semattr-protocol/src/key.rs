use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::{AttributeKind, AttributeType};

/// The name of an attribute, bound to the type of value it carries.
///
/// Keys from the fixed vocabulary are `const` and borrow a static name. Keys synthesized at
/// runtime, such as the ones for captured headers, own their name.
pub struct AttributeKey<T> {
    name: Cow<'static, str>,
    _ty: PhantomData<fn() -> T>,
}

impl<T> AttributeKey<T> {
    /// Creates a key with a static name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _ty: PhantomData,
        }
    }

    /// Creates a key with a name computed at runtime.
    pub fn owned(name: String) -> Self {
        Self {
            name: Cow::Owned(name),
            _ty: PhantomData,
        }
    }

    /// Returns the name of this key.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: AttributeType> AttributeKey<T> {
    /// Returns the kind of value stored under this key.
    pub fn kind(&self) -> AttributeKind {
        T::KIND
    }
}

impl<T> Clone for AttributeKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _ty: PhantomData,
        }
    }
}

impl<T> PartialEq for AttributeKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for AttributeKey<T> {}

impl<T> Hash for AttributeKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T: AttributeType> fmt::Debug for AttributeKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeKey")
            .field("name", &self.name)
            .field("kind", &T::KIND)
            .finish()
    }
}

impl<T> fmt::Display for AttributeKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_and_owned_keys_compare_by_name() {
        const STATIC: AttributeKey<i64> = AttributeKey::new("http.status_code");
        let owned = AttributeKey::<i64>::owned("http.status_code".to_owned());

        assert_eq!(STATIC, owned);
        assert_eq!(owned.kind(), AttributeKind::Integer);
        assert_eq!(owned.to_string(), "http.status_code");
    }
}
