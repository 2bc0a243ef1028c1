use crate::{FetchStatus, Fetcher};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Tracks the fetch for the most recently requested name.
///
/// Each [`request`](Self::request) for a new name starts a fetch and moves the
/// status to `Pending`. When a fetch settles, its result is published only if
/// its name is still the current one; a result for a superseded name is
/// dropped, never merged. [`reset`](Self::reset) clears the name so the same
/// request can be made again after a failure.
///
/// `request` spawns onto the current Tokio runtime and must be called from
/// within one.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use tictac_fetch::{FetchController, FetchError, FetchStatus, Fetcher};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Fetcher for Echo {
///     type Output = String;
///
///     async fn fetch(&self, name: &str) -> Result<String, FetchError> {
///         Ok(name.to_uppercase())
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let controller = FetchController::new(Echo);
/// controller.request("pikachu");
///
/// let status = controller.settled().await;
/// assert_eq!(status.data().map(String::as_str), Some("PIKACHU"));
/// # });
/// ```
pub struct FetchController<F: Fetcher> {
    fetcher: Arc<F>,
    shared: Arc<Shared<F::Output>>,
}

struct Shared<T> {
    current: Mutex<Current>,
    status: watch::Sender<FetchStatus<T>>,
}

#[derive(Default)]
struct Current {
    name: String,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl<F: Fetcher> FetchController<F> {
    pub fn new(fetcher: F) -> Self {
        let (status, _) = watch::channel(FetchStatus::Idle);
        Self {
            fetcher: Arc::new(fetcher),
            shared: Arc::new(Shared {
                current: Mutex::new(Current::default()),
                status,
            }),
        }
    }

    /// Track `name`, starting a fetch if it differs from the current name.
    ///
    /// Requesting the current name again does nothing. An empty name returns
    /// the controller to `Idle`.
    pub fn request(&self, name: impl Into<String>) {
        let name = name.into();
        let mut current = self.shared.current.lock();
        if current.name == name {
            return;
        }

        current.name = name.clone();
        current.generation += 1;
        if let Some(task) = current.task.take() {
            task.abort();
        }

        if name.is_empty() {
            self.shared.status.send_replace(FetchStatus::Idle);
            return;
        }

        debug!("Fetching '{}' (generation {})", name, current.generation);
        self.shared
            .status
            .send_replace(FetchStatus::Pending { name: name.clone() });

        let generation = current.generation;
        let fetcher = Arc::clone(&self.fetcher);
        let shared = Arc::clone(&self.shared);
        current.task = Some(tokio::spawn(async move {
            let result = fetcher.fetch(&name).await;

            let current = shared.current.lock();
            if current.generation != generation {
                debug!("Dropping result for superseded request '{}'", name);
                return;
            }

            let status = match result {
                Ok(data) => FetchStatus::Resolved { name, data },
                Err(error) => {
                    warn!("Fetch failed: {}", error);
                    FetchStatus::Rejected { name, error }
                }
            };
            shared.status.send_replace(status);
        }));
    }

    /// Clear the current name and return to `Idle`.
    ///
    /// This is the recovery action after a rejection: once the name is
    /// cleared, requesting it again starts a fresh fetch.
    pub fn reset(&self) {
        let mut current = self.shared.current.lock();
        if let Some(task) = current.task.take() {
            task.abort();
        }
        current.name.clear();
        current.generation += 1;
        self.shared.status.send_replace(FetchStatus::Idle);
        info!("Fetch state reset");
    }

    /// Reset, then request the name that was current before the reset.
    pub fn retry(&self) {
        let name = self.name();
        self.reset();
        self.request(name);
    }

    /// The name currently tracked; empty when idle.
    pub fn name(&self) -> String {
        self.shared.current.lock().name.clone()
    }

    pub fn status(&self) -> FetchStatus<F::Output> {
        self.shared.status.borrow().clone()
    }

    /// Receiver notified on every status change.
    pub fn subscribe(&self) -> watch::Receiver<FetchStatus<F::Output>> {
        self.shared.status.subscribe()
    }

    /// Wait until the status is no longer `Pending`.
    pub async fn settled(&self) -> FetchStatus<F::Output> {
        let mut receiver = self.subscribe();
        let settled = match receiver.wait_for(|status| !status.is_pending()).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        };
        settled
    }
}

impl<F: Fetcher> Drop for FetchController<F> {
    fn drop(&mut self) {
        if let Some(task) = self.shared.current.lock().task.take() {
            task.abort();
        }
    }
}
