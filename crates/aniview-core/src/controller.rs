//! Single-flight, cancellable loading.
//!
//! One `LoadController` owns the "current load" of a screen session.  Each
//! `request` aborts whatever was in flight and spawns a fresh fetch task, so
//! at most one task can ever settle the published state.  Observers subscribe
//! through a watch channel and always see a consistent snapshot.
//!
//! # States
//! ```text
//!  Idle ──request──▶ Loading ──▶ Success(T) | Failure(FetchError)
//!  any state ──dispose──▶ Disposed (terminal)
//! ```
//!
//! A superseded task is aborted, and a generation counter discards its
//! result in case it was already past its last await point.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{Disposed, FetchError};
use crate::state::LoadState;

type FetchFn<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync>;

/// Asynchronous loader that keys every request and only ever lets the newest
/// one settle the observable state.
///
/// `request` must be called from within a Tokio runtime; the fetch task is
/// spawned onto it.  All methods take `&self`, so a model can hand out
/// references freely.  Dropping the controller disposes it.
pub struct LoadController<K, T> {
    shared: Arc<Shared<K, T>>,
    fetch: FetchFn<K, T>,
    timeout: Option<Duration>,
}

struct Shared<K, T> {
    inner: Mutex<Inner<K>>,
    tx: watch::Sender<LoadState<T>>,
}

struct Inner<K> {
    /// Bumped on every request and on dispose.  A completing task publishes
    /// only while its captured generation is still the current one.
    generation: u64,
    task: Option<JoinHandle<()>>,
    current_key: Option<K>,
    disposed: bool,
}

impl<K, T> LoadController<K, T>
where
    K: Clone + PartialEq + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create a controller around a fetch function.
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        Self::build(fetch, None)
    }

    /// Like [`new`](Self::new), but a fetch that runs longer than `timeout`
    /// is cancelled and surfaces as `Failure(Network)`.
    pub fn with_timeout<F, Fut>(fetch: F, timeout: Duration) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        Self::build(fetch, Some(timeout))
    }

    fn build<F, Fut>(fetch: F, timeout: Option<Duration>) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let (tx, _rx) = watch::channel(LoadState::Idle);
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    generation: 0,
                    task: None,
                    current_key: None,
                    disposed: false,
                }),
                tx,
            }),
            fetch: Arc::new(move |key| Box::pin(fetch(key))),
            timeout,
        }
    }

    /// Start loading `key`, superseding any load in flight.
    ///
    /// The previous task is aborted first, then `Loading` is published, then
    /// the new fetch is spawned.  A repeat of the current key restarts too;
    /// callers that want same-key idempotence compare against
    /// [`current_key`](Self::current_key) before calling.
    pub fn request(&self, key: K) -> Result<(), Disposed> {
        let mut inner = self.shared.inner.lock().expect("load state lock poisoned");
        if inner.disposed {
            return Err(Disposed);
        }

        inner.generation += 1;
        let generation = inner.generation;
        if let Some(prev) = inner.task.take() {
            debug!("LoadController: superseding in-flight load (gen {})", generation);
            prev.abort();
        }
        inner.current_key = Some(key.clone());

        // Publish under the lock so observers see Loading strictly between
        // the old request's last word and the new request's outcome.
        self.shared.tx.send_replace(LoadState::Loading);

        let fut = (self.fetch)(key);
        let shared = Arc::clone(&self.shared);
        let timeout = self.timeout;
        inner.task = Some(tokio::spawn(async move {
            let result = match timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(FetchError::Network(format!(
                        "request timed out after {}ms",
                        limit.as_millis()
                    ))),
                },
                None => fut.await,
            };
            shared.complete(generation, result);
        }));
        Ok(())
    }

    /// Re-request the current key.  Returns `Ok(false)` when nothing has
    /// been requested yet.
    pub fn retry(&self) -> Result<bool, Disposed> {
        let key = {
            let inner = self.shared.inner.lock().expect("load state lock poisoned");
            if inner.disposed {
                return Err(Disposed);
            }
            inner.current_key.clone()
        };
        match key {
            Some(key) => self.request(key).map(|()| true),
            None => Ok(false),
        }
    }

    /// Subscribe to the state.  The receiver starts at the current value;
    /// use `borrow` for a snapshot and `changed`/`wait_for` for transitions.
    pub fn observe(&self) -> watch::Receiver<LoadState<T>> {
        self.shared.tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoadState<T> {
        self.shared.tx.borrow().clone()
    }

    /// The key of the newest request, if any.  Survives settlement, so
    /// callers can compare it for same-key idempotence.
    pub fn current_key(&self) -> Option<K> {
        self.shared
            .inner
            .lock()
            .expect("load state lock poisoned")
            .current_key
            .clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared
            .inner
            .lock()
            .expect("load state lock poisoned")
            .disposed
    }

    /// Tear the controller down: abort any in-flight fetch and publish the
    /// terminal `Disposed` state.  Safe to call more than once.
    pub fn dispose(&self) {
        self.shared.dispose();
    }
}

impl<K, T> Shared<K, T> {
    /// Completion path for fetch tasks.  Publishes only while `generation`
    /// is still current; anything else is a superseded task whose result
    /// must not be seen.
    fn complete(&self, generation: u64, result: Result<T, FetchError>) {
        let inner = self.inner.lock().expect("load state lock poisoned");
        if inner.disposed || inner.generation != generation {
            debug!(
                "LoadController: discarding stale result (gen {}, current {})",
                generation, inner.generation
            );
            return;
        }
        match result {
            Ok(value) => {
                self.tx.send_replace(LoadState::Success(value));
            }
            Err(err) => {
                debug!("LoadController: load failed: {}", err);
                self.tx.send_replace(LoadState::Failure(err));
            }
        }
    }

    fn dispose(&self) {
        let mut inner = self.inner.lock().expect("load state lock poisoned");
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        // Fence off completions that are already past their abort point.
        inner.generation += 1;
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        self.tx.send_replace(LoadState::Disposed);
    }
}

impl<K, T> Drop for LoadController<K, T> {
    fn drop(&mut self) {
        self.shared.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_publishes_success() {
        let controller = LoadController::new(|key: u32| async move { Ok(key * 2) });
        let mut rx = controller.observe();
        assert!(controller.state().is_idle());
        assert_eq!(controller.current_key(), None);

        controller.request(21).unwrap();
        let state = rx.wait_for(|s| s.is_settled()).await.unwrap().clone();
        assert_eq!(state, LoadState::Success(42));
        assert_eq!(controller.current_key(), Some(21));
    }

    #[tokio::test]
    async fn test_dispose_rejects_further_calls() {
        let controller = LoadController::new(|key: u32| async move { Ok(key) });
        controller.dispose();
        controller.dispose();
        assert!(controller.state().is_disposed());
        assert!(controller.is_disposed());
        assert_eq!(controller.request(1), Err(Disposed));
        assert_eq!(controller.retry(), Err(Disposed));
    }

    #[tokio::test]
    async fn test_retry_without_request_is_a_noop() {
        let controller = LoadController::new(|key: u32| async move { Ok(key) });
        assert_eq!(controller.retry(), Ok(false));
        assert!(controller.state().is_idle());
    }
}
