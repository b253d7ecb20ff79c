//! Best-effort "new review" notices for authors.
//!
//! Each notice runs as its own detached tokio task: nobody joins it, nothing
//! cancels it, and whatever is still sleeping when the process exits is lost.
//! The number of pending notices is capped; once the cap is reached new
//! notices are dropped with a warning. [`NotificationDispatcher::drain`]
//! gives pending notices a bounded wait before the process exits.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// What gets delivered: copied out of the book and author at dispatch time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub email: String,
    pub book_title: String,
}

impl Notice {
    pub fn new(email: impl Into<String>, book_title: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            book_title: book_title.into(),
        }
    }

    pub fn message(&self) -> String {
        format!("Your book '{}' has a new review.", self.book_title)
    }

    /// Console line announcing delivery
    pub fn announcement(&self) -> String {
        format!("Notification sent to {}: {}", self.email, self.message())
    }
}

/// Destination for notices once their latency has elapsed
pub trait NoticeSink: Send + Sync {
    fn deliver(&self, notice: &Notice);
}

/// Default sink: prints the notice on stdout and records the delivery in
/// the log
pub struct StdoutSink;

impl NoticeSink for StdoutSink {
    fn deliver(&self, notice: &Notice) {
        println!("{}", notice.announcement());
        info!(email = %notice.email, title = %notice.book_title, "Notification delivered");
    }
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    latency: Duration,
    max_in_flight: usize,
    permits: Arc<Semaphore>,
    sink: Arc<dyn NoticeSink>,
}

impl NotificationDispatcher {
    pub fn new(latency: Duration, max_in_flight: usize) -> Self {
        Self {
            latency,
            max_in_flight,
            permits: Arc::new(Semaphore::new(max_in_flight)),
            sink: Arc::new(StdoutSink),
        }
    }

    /// Replace the delivery sink
    pub fn with_sink(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Fire and forget. Returns immediately; delivery happens on the tokio
    /// runtime the caller is running inside, if any.
    pub fn dispatch(&self, notice: Notice) {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(email = %notice.email, title = %notice.book_title, "No async runtime, notification dropped");
                return;
            }
        };

        let permit = match Arc::clone(&self.permits).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!(
                    email = %notice.email,
                    title = %notice.book_title,
                    max_in_flight = self.max_in_flight,
                    "Notification queue full, notification dropped"
                );
                return;
            }
        };

        debug!(email = %notice.email, title = %notice.book_title, "Notification scheduled");
        let sink = Arc::clone(&self.sink);
        let latency = self.latency;
        handle.spawn(async move {
            let _permit = permit;
            tokio::time::sleep(latency).await;
            sink.deliver(&notice);
        });
    }

    /// Notices spawned but not yet delivered
    pub fn in_flight(&self) -> usize {
        self.max_in_flight - self.permits.available_permits()
    }

    /// Wait up to `grace` for pending notices to be delivered. Returns
    /// `false` when some were still pending at the deadline.
    pub async fn drain(&self, grace: Duration) -> bool {
        if self.in_flight() == 0 {
            return true;
        }

        let all = u32::try_from(self.max_in_flight).unwrap_or(u32::MAX);
        match tokio::time::timeout(grace, self.permits.acquire_many(all)).await {
            Ok(Ok(_permits)) => true,
            _ => {
                warn!(
                    pending = self.in_flight(),
                    "Exiting with undelivered notifications"
                );
                false
            }
        }
    }
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000), 64)
    }
}

impl fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("latency", &self.latency)
            .field("max_in_flight", &self.max_in_flight)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}
