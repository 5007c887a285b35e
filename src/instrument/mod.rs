//! Instrumentation Module
//!
//! Cross-cutting wrappers that observe storage operations without the
//! operation knowing about it.
//!
//! An [`Operation`] is a stable name plus an async callable. Wrappers are
//! operations themselves, so they compose by nesting:
//!
//! ```ignore
//! let op = StoreValue::new(store.clone())
//!     .with_history(store.clone()) // inner: records actual args and result
//!     .counted(store.clone());     // outer: counts every attempt
//! ```
//!
//! The counter must sit outside the history recorder. It then increments once
//! per outer invocation, before anything else happens, and always upper-bounds
//! the number of recorded history entries.

mod counter;
mod history;

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::ArgTuple;
use crate::error::Result;
use crate::store::KeyedStore;

pub use counter::Counted;
pub use history::{error_marker, Recorded};

// == Operation Trait ==
/// A named storage operation that can be wrapped by instrumentation.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Result type; its `Display` form is what the history recorder persists.
    type Output: Display + Send;

    /// Stable name, used to derive the counter and history keys.
    fn name(&self) -> &str;

    /// Runs the operation with the given positional arguments.
    async fn invoke(&self, args: &ArgTuple) -> Result<Self::Output>;
}

// == Composition ==
/// Wrapping combinators available on every operation.
pub trait OperationExt: Operation + Sized {
    /// Counts every invocation under the operation's name.
    fn counted(self, store: Arc<dyn KeyedStore>) -> Counted<Self> {
        Counted::new(self, store)
    }

    /// Records the argument tuple and result of every invocation.
    fn with_history(self, store: Arc<dyn KeyedStore>) -> Recorded<Self> {
        Recorded::new(self, store)
    }
}

impl<O: Operation> OperationExt for O {}
