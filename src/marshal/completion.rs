use super::{BoxError, InvocationError};
use crate::value::RemoteValue;
use futures::channel::oneshot;
use std::sync::{Arc, Mutex};

pub type CompletionResult = Result<Vec<RemoteValue>, InvocationError>;

/// Single-assignment channel through which a target method reports its
/// outcome.
///
/// The handle may be cloned and moved to other tasks or threads; whichever
/// clone signals first wins and every later signal is ignored. Output values
/// are positional and line up with the descriptor's `returns`.
#[derive(Clone)]
pub struct Completion {
    method: Arc<str>,
    sender: Arc<Mutex<Option<oneshot::Sender<CompletionResult>>>>,
}

impl Completion {
    /// Creates a completion handle and the receiver the invoker awaits.
    pub fn channel(method: &str) -> (Self, oneshot::Receiver<CompletionResult>) {
        let (tx, rx) = oneshot::channel();
        let completion = Self {
            method: Arc::from(method),
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (completion, rx)
    }

    /// Reports success with the method's output values.
    pub fn resolve(&self, values: Vec<RemoteValue>) -> bool {
        self.signal(Ok(values))
    }

    /// Reports failure.
    pub fn reject(&self, err: BoxError) -> bool {
        self.signal(Err(InvocationError::from_error(err.as_ref())))
    }

    /// Callback-style signal: `Err` rejects, `Ok` resolves.
    pub fn complete(&self, result: Result<Vec<RemoteValue>, BoxError>) -> bool {
        match result {
            Ok(values) => self.resolve(values),
            Err(err) => self.reject(err),
        }
    }

    /// Returns `false` when the completion was already signaled.
    pub(crate) fn signal(&self, result: CompletionResult) -> bool {
        let sender = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            // A poisoned lock means another signal panicked mid-flight;
            // treat the channel as already used.
            Err(_) => None,
        };

        match sender {
            Some(tx) => {
                // The receiver is gone only if the invoker itself was dropped.
                if tx.send(result).is_err() {
                    tracing::debug!(method = %self.method, "completion signaled after invoker went away");
                }
                true
            }
            None => {
                tracing::warn!(method = %self.method, "completion signaled more than once; ignoring");
                false
            }
        }
    }

    pub fn is_signaled(&self) -> bool {
        self.sender
            .lock()
            .map(|guard| guard.is_none())
            .unwrap_or(true)
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("method", &self.method)
            .field("signaled", &self.is_signaled())
            .finish()
    }
}
