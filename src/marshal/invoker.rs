use super::{BoxError, Completion, InvocationError};
use crate::value::{Arguments, RemoteValue};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// A target method: resolved arguments plus a trailing completion handle.
///
/// Returning `Err` (or panicking) before the completion is signaled is the
/// same as rejecting the completion.
pub type RemoteHandler =
    Arc<dyn Fn(Arguments, Completion) -> Result<(), BoxError> + Send + Sync>;

/// Wraps a callback-terminated closure as a [`RemoteHandler`].
pub fn handler<F>(f: F) -> RemoteHandler
where
    F: Fn(Arguments, Completion) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a closure that produces its outputs directly.
pub fn sync_handler<F>(f: F) -> RemoteHandler
where
    F: Fn(Arguments) -> Result<Vec<RemoteValue>, BoxError> + Send + Sync + 'static,
{
    Arc::new(move |args, completion| {
        completion.complete(f(args));
        Ok(())
    })
}

/// Calls target methods and waits for their completion signal.
pub struct Invoker;

impl Invoker {
    /// Invokes `handler` with `args` and waits for the first completion
    /// signal, however long it takes.
    ///
    /// Synchronous errors and panics are captured here and never propagate
    /// past this call.
    pub async fn invoke(
        method: &str,
        handler: &RemoteHandler,
        args: Arguments,
    ) -> Result<Vec<RemoteValue>, InvocationError> {
        let (completion, receiver) = Completion::channel(method);

        let outcome = catch_unwind(AssertUnwindSafe(|| handler(args, completion.clone())));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::debug!(method, error = %err, "method failed synchronously");
                completion.reject(err);
            }
            Err(payload) => {
                let err = InvocationError::from_panic(payload.as_ref());
                tracing::debug!(method, error = %err, "method panicked");
                completion.signal(Err(err));
            }
        }

        // Only clones held by the method keep the channel open from here on.
        drop(completion);

        match receiver.await {
            Ok(result) => result,
            Err(_) => Err(InvocationError::new(format!(
                "method {method:?} completed without signaling a result"
            ))),
        }
    }
}
