use std::future::{pending, Future};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{sleep_until, Instant};

use crate::error::{Error, Result};

#[derive(Debug)]
struct Signal {
    run: AtomicBool,
    stop: Notify,
}

/// Execution context handed to every effect: a cancellation signal shared by all derived
/// contexts, plus an optional deadline.
#[derive(Clone, Debug)]
pub struct Context {
    signal: Arc<Signal>,
    deadline: Option<Instant>,
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    pub fn background() -> Self {
        Context { signal: Arc::new(Signal { run: AtomicBool::new(true), stop: Notify::new() }), deadline: None }
    }

    /// Derives a context sharing this one's cancellation signal. An earlier existing deadline wins.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        };
        Context { signal: self.signal.clone(), deadline: Some(deadline) }
    }

    /// A timeout too large to represent as an instant leaves the current deadline in place.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.clone(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.signal.run.store(false, Ordering::SeqCst);
        self.signal.stop.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        !self.signal.run.load(Ordering::SeqCst)
    }

    pub fn err(&self) -> Option<Error> {
        if self.is_cancelled() {
            return Some(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Error::DeadlineExceeded),
            _ => None,
        }
    }

    /// Awaits `future` unless the context is cancelled or its deadline passes first.
    /// A context that is already done fails without polling `future`.
    pub async fn guard<T, F>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        // Registered before the flag check so a concurrent cancel() cannot slip in between
        let stopped = self.signal.stop.notified();
        if let Some(e) = self.err() {
            return Err(e);
        }
        let expired = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = stopped => Err(Error::Cancelled),
            _ = expired => Err(Error::DeadlineExceeded),
            result = future => result,
        }
    }
}
