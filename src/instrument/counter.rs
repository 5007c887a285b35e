//! Call counting wrapper.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::ArgTuple;
use crate::error::Result;
use crate::instrument::Operation;
use crate::store::{counter_key, KeyedStore};

// == Counted ==
/// Increments the operation's call counter, then delegates.
///
/// The increment happens before the wrapped call, so an attempt that fails or
/// never returns is still counted.
pub struct Counted<O> {
    inner: O,
    store: Arc<dyn KeyedStore>,
}

impl<O: Operation> Counted<O> {
    pub fn new(inner: O, store: Arc<dyn KeyedStore>) -> Self {
        Self { inner, store }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O: Operation> Operation for Counted<O> {
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn invoke(&self, args: &ArgTuple) -> Result<Self::Output> {
        let calls = self.store.increment(&counter_key(self.name())).await?;
        debug!(operation = self.name(), calls, "Call counted");
        self.inner.invoke(args).await
    }
}
