//! Cache Module
//!
//! Stores caller values under fresh random keys and reads them back, with the
//! `store` operation counted and its history recorded.

mod value;


use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{CacheError, Result};
use crate::instrument::{Counted, Operation, OperationExt, Recorded};
use crate::replay::OperationHandle;
use crate::store::KeyedStore;

pub use value::{ArgTuple, StoreKey, StoredValue};

// == Public Constants ==
/// Stable name of the instrumented store operation
pub const STORE_OPERATION: &str = "store";

// == Store Value Operation ==
/// Core of `Cache::store`: writes one value under a key never issued before.
pub struct StoreValue {
    store: Arc<dyn KeyedStore>,
}

impl StoreValue {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self { store }
    }

    async fn fresh_key(&self) -> Result<StoreKey> {
        loop {
            let key = StoreKey::random();
            if !self.store.exists(key.as_str()).await? {
                return Ok(key);
            }
        }
    }
}

#[async_trait]
impl Operation for StoreValue {
    type Output = StoreKey;

    fn name(&self) -> &str {
        STORE_OPERATION
    }

    async fn invoke(&self, args: &ArgTuple) -> Result<StoreKey> {
        let value = match (args.get(0), args.len()) {
            (Some(value), 1) => value,
            _ => {
                return Err(CacheError::InvalidRequest(format!(
                    "{} takes exactly one argument, got {}",
                    STORE_OPERATION,
                    args.len()
                )))
            }
        };

        let key = self.fresh_key().await?;
        self.store.set(key.as_str(), &value.to_bytes()).await?;
        Ok(key)
    }
}

// == Cache ==
/// Key-value cache over a [`KeyedStore`].
pub struct Cache {
    store: Arc<dyn KeyedStore>,
    /// `store`, history recorded (inner) and counted (outer)
    store_op: Counted<Recorded<StoreValue>>,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache and clears the entire backing keyspace.
    ///
    /// The reset has completed by the time this returns, so no operation on
    /// the new cache can observe earlier counters or histories.
    pub async fn new(store: Arc<dyn KeyedStore>) -> Result<Self> {
        store.reset_all().await?;
        info!("Cache initialized, keyspace reset");

        let store_op = StoreValue::new(store.clone())
            .with_history(store.clone())
            .counted(store.clone());

        Ok(Self { store, store_op })
    }

    // == Store ==
    /// Stores `value` under a fresh random key and returns the key.
    pub async fn store(&self, value: impl Into<StoredValue>) -> Result<StoreKey> {
        let key = self.store_op.invoke(&ArgTuple::single(value)).await?;
        debug!(%key, "Value stored");
        Ok(key)
    }

    // == Retrieve ==
    /// Returns the raw bytes stored under `key`, or `None` if absent.
    pub async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Returns the value under `key` passed through `decode`, or `None` if absent.
    pub async fn retrieve_with<T, F>(&self, key: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        match self.retrieve(key).await? {
            Some(bytes) => decode(bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the value under `key` decoded as UTF-8 text.
    pub async fn retrieve_as_text(&self, key: &str) -> Result<Option<String>> {
        self.retrieve_with(key, decode_text).await
    }

    /// Returns the value under `key` parsed as a base-10 integer.
    pub async fn retrieve_as_integer(&self, key: &str) -> Result<Option<i64>> {
        self.retrieve_with(key, |bytes| parse_number(bytes, "integer"))
            .await
    }

    /// Returns the value under `key` parsed as a floating-point number.
    pub async fn retrieve_as_float(&self, key: &str) -> Result<Option<f64>> {
        self.retrieve_with(key, |bytes| parse_number(bytes, "float"))
            .await
    }

    // == Handles ==
    /// Names of the instrumented operations on this cache.
    pub fn operations(&self) -> Vec<&str> {
        vec![self.store_op.name()]
    }

    /// Returns a replay handle for a registered operation.
    pub fn handle(&self, operation: &str) -> Option<OperationHandle> {
        self.operations()
            .iter()
            .any(|name| *name == operation)
            .then(|| OperationHandle::new(operation, &self.store))
    }

    /// Returns the replay handle of the `store` operation.
    pub fn store_handle(&self) -> OperationHandle {
        OperationHandle::new(self.store_op.name(), &self.store)
    }
}

fn decode_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| CacheError::Decode(format!("invalid UTF-8: {}", e)))
}

fn parse_number<T: std::str::FromStr>(bytes: Vec<u8>, kind: &str) -> Result<T> {
    let text = decode_text(bytes)?;
    text.trim()
        .parse()
        .map_err(|_| CacheError::Decode(format!("{:?} is not a valid {}", text, kind)))
}
