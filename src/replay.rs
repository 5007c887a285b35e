//! Replay Module
//!
//! Rebuilds the call log of an instrumented operation from its recorded
//! counter and history lists, and renders it as text:
//!
//! ```text
//! store was called 2 times:
//! store(*("foo",)) -> 0c6a2f4e-...
//! store(*(42,)) -> 7d1b9c30-...
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use serde::Serialize;
use tracing::warn;

use crate::error::{CacheError, Result};
use crate::store::{counter_key, inputs_key, outputs_key, KeyedStore, MemoryStore};

// == Operation Handle ==
/// Identifies one instrumented operation bound to one store.
///
/// The handle holds the store weakly; once the store is dropped the handle
/// no longer resolves.
#[derive(Clone)]
pub struct OperationHandle {
    name: String,
    store: Weak<dyn KeyedStore>,
}

impl OperationHandle {
    pub fn new(name: impl Into<String>, store: &Arc<dyn KeyedStore>) -> Self {
        Self {
            name: name.into(),
            store: Arc::downgrade(store),
        }
    }

    /// A handle bound to no store at all.
    pub fn detached(name: impl Into<String>) -> Self {
        let store: Weak<dyn KeyedStore> = Weak::<MemoryStore>::new();
        Self {
            name: name.into(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the store, or explains why the handle is unusable.
    fn resolve(&self) -> Result<Arc<dyn KeyedStore>> {
        if self.name.is_empty() {
            return Err(CacheError::InvalidHandle("empty operation name".to_string()));
        }
        if self.name.contains(':') {
            return Err(CacheError::InvalidHandle(format!(
                "{:?} is a derived key, not an operation name",
                self.name
            )));
        }
        self.store.upgrade().ok_or_else(|| {
            CacheError::InvalidHandle(format!("{:?} is not bound to a live store", self.name))
        })
    }
}

impl fmt::Debug for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationHandle")
            .field("name", &self.name)
            .field("bound", &(self.store.strong_count() > 0))
            .finish()
    }
}

// == Call Log ==
/// One recorded call: serialized argument tuple and serialized output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

/// Replayed history of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallLog {
    pub operation: String,
    /// Value of the call counter; may exceed `calls.len()` if recording failed
    pub count: i64,
    pub calls: Vec<CallRecord>,
}

impl CallLog {
    pub fn header(&self) -> String {
        format!("{} was called {} times:", self.operation, self.count)
    }

    /// Detail lines, one per recorded call, in call order.
    pub fn lines(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|call| format!("{}(*{}) -> {}", self.operation, call.input, call.output))
            .collect()
    }
}

impl fmt::Display for CallLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Reads back the call log for `handle`.
///
/// Returns `Ok(None)` for a handle that does not resolve to a live operation;
/// the problem is logged and nothing is rendered. Store failures propagate.
pub async fn replay(handle: &OperationHandle) -> Result<Option<CallLog>> {
    let store = match handle.resolve() {
        Ok(store) => store,
        Err(error) => {
            warn!(%error, "Replay skipped");
            return Ok(None);
        }
    };
    let name = handle.name();

    let count = match store.get(&counter_key(name)).await? {
        Some(bytes) => String::from_utf8_lossy(&bytes)
            .trim()
            .parse::<i64>()
            .map_err(|_| CacheError::Decode(format!("call counter for {:?} is corrupt", name)))?,
        None => 0,
    };

    let inputs = store.range_list(&inputs_key(name), 0, -1).await?;
    let outputs = store.range_list(&outputs_key(name), 0, -1).await?;

    let calls = inputs
        .iter()
        .zip(outputs.iter())
        .map(|(input, output)| CallRecord {
            input: String::from_utf8_lossy(input).into_owned(),
            output: String::from_utf8_lossy(output).into_owned(),
        })
        .collect();

    Ok(Some(CallLog {
        operation: name.to_string(),
        count,
        calls,
    }))
}

/// Replays `handle` to stdout.
pub async fn print_replay(handle: &OperationHandle) -> Result<()> {
    if let Some(log) = replay(handle).await? {
        print!("{}", log);
    }
    Ok(())
}
