//! Stored values, keys and argument tuples.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Stored Value ==
/// A value as presented by a caller of [`Cache::store`](crate::cache::Cache::store).
///
/// Every variant encodes to the bytes a Redis client would write for it:
/// text as UTF-8, bytes unchanged, numbers as decimal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StoredValue {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl StoredValue {
    /// Encodes the value into the byte string persisted by the store.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Bytes(bytes) => bytes.clone(),
            StoredValue::Integer(n) => n.to_string().into_bytes(),
            StoredValue::Float(x) => x.to_string().into_bytes(),
        }
    }
}

/// Argument-list rendering used in call histories.
impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Text(text) => write!(f, "{:?}", text),
            StoredValue::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            StoredValue::Integer(n) => write!(f, "{}", n),
            StoredValue::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Integer(value.into())
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

// == Store Key ==
/// Opaque key issued by the cache for a stored value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreKey(String);

impl StoreKey {
    /// Generates a fresh random (UUID v4) key.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StoreKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Argument Tuple ==
/// Positional arguments of one instrumented call.
///
/// Renders as a Rust tuple literal: `()`, `("foo",)`, `(1, b"raw")`. Text is
/// double-quoted with Rust escapes and bytes use `b"..."` literals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgTuple(Vec<StoredValue>);

impl ArgTuple {
    pub fn new(args: Vec<StoredValue>) -> Self {
        Self(args)
    }

    /// Builds a one-element tuple.
    pub fn single(value: impl Into<StoredValue>) -> Self {
        Self(vec![value.into()])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StoredValue> {
        self.0.get(index)
    }
}

impl fmt::Display for ArgTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        if self.0.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}
