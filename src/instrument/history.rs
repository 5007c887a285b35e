//! Call history wrapper.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::ArgTuple;
use crate::error::{CacheError, Result};
use crate::instrument::Operation;
use crate::store::{inputs_key, outputs_key, KeyedStore};

/// Output recorded in place of a result when the wrapped call fails.
pub fn error_marker(error: &CacheError) -> String {
    format!("<error: {}>", error)
}

// == Recorded ==
/// Appends the argument tuple before delegating and the result afterwards.
///
/// A failed call records [`error_marker`] as its output and the original error
/// is returned, so `<op>:inputs` and `<op>:outputs` stay the same length.
pub struct Recorded<O> {
    inner: O,
    store: Arc<dyn KeyedStore>,
}

impl<O: Operation> Recorded<O> {
    pub fn new(inner: O, store: Arc<dyn KeyedStore>) -> Self {
        Self { inner, store }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O: Operation> Operation for Recorded<O> {
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn invoke(&self, args: &ArgTuple) -> Result<Self::Output> {
        let name = self.name();
        self.store
            .append_to_list(&inputs_key(name), args.to_string().as_bytes())
            .await?;

        let result = self.inner.invoke(args).await;

        let output = match &result {
            Ok(value) => value.to_string(),
            Err(error) => {
                warn!(operation = name, %error, "Instrumented call failed");
                error_marker(error)
            }
        };
        let appended = self
            .store
            .append_to_list(&outputs_key(name), output.as_bytes())
            .await;
        debug!(operation = name, %args, %output, "Call recorded");

        // The call's own error wins over a failure to record it.
        let value = result?;
        appended?;
        Ok(value)
    }
}
