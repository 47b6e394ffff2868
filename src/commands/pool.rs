//! Bounded execution of command invocations
//!
//! Every submitted invocation runs in its own tokio task under a supervising
//! task. The supervisor is the fault boundary: error results, panics and
//! deadline overruns are turned into [`InvocationFault`]s and handed to the
//! [`FaultReporter`]; nothing propagates back to the dispatcher.
//!
//! An invocation past its deadline is aborted and reported straight away, but
//! its permit and pending slot stay taken until the task has really stopped.
//! Code that blocks the thread therefore still counts against the limits.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Hold the permit until an aborted invocation has stopped
//! - 1.1.0: Optional per-invocation deadline
//! - 1.0.0: Semaphore-bounded concurrency with pending limit

use log::{debug, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Instant};

use super::context::InvocationContext;
use super::fault::{panic_message, FaultKind, FaultReporter, InvocationFault};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Invocations allowed to run at the same time
    pub max_concurrent: usize,
    /// Invocations allowed in flight (running plus waiting for a permit)
    pub max_pending: usize,
    /// Abandon an invocation after this long
    pub deadline: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 16,
            max_pending: 256,
            deadline: Some(Duration::from_secs(30)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invocation pool is full ({0} in flight)")]
pub struct Overloaded(pub usize);

/// Completion handle for a submitted invocation
///
/// Dropping it does not cancel the invocation.
#[derive(Debug)]
pub struct InvocationHandle(JoinHandle<()>);

impl InvocationHandle {
    /// Wait until the invocation has finished and any fault has been reported
    pub async fn join(self) {
        if let Err(e) = self.0.await {
            warn!("Invocation supervisor ended abnormally: {e}");
        }
    }
}

/// Releases an in-flight slot when the supervising task ends
struct Slot(Arc<AtomicUsize>);

impl Drop for Slot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct InvocationPool {
    permits: Arc<Semaphore>,
    in_flight: Arc<AtomicUsize>,
    max_pending: usize,
    deadline: Option<Duration>,
    reporter: Arc<dyn FaultReporter>,
}

impl InvocationPool {
    pub fn new(config: PoolConfig, reporter: Arc<dyn FaultReporter>) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(
                config.max_concurrent.clamp(1, Semaphore::MAX_PERMITS),
            )),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_pending: config.max_pending.max(1),
            deadline: config.deadline,
            reporter,
        }
    }

    /// Invocations currently running or waiting to run
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Start an invocation without waiting for it
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, ctx: InvocationContext) -> Result<InvocationHandle, Overloaded> {
        let max = self.max_pending;
        if self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < max).then_some(n + 1))
            .is_err()
        {
            return Err(Overloaded(max));
        }

        let slot = Slot(Arc::clone(&self.in_flight));
        let permits = Arc::clone(&self.permits);
        let reporter = Arc::clone(&self.reporter);
        let deadline = self.deadline;

        let handle = tokio::spawn(async move {
            let _slot = slot;
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            supervise(ctx, deadline, reporter.as_ref()).await;
        });

        Ok(InvocationHandle(handle))
    }
}

async fn supervise(ctx: InvocationContext, deadline: Option<Duration>, reporter: &dyn FaultReporter) {
    let request_id = ctx.request_id();
    let command = ctx.name().to_string();
    let author = ctx.author().id;
    let started = Instant::now();

    let mut task = tokio::spawn(async move { ctx.command().invoke(&ctx).await });

    let joined = match deadline {
        Some(limit) => match timeout(limit, &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                task.abort();
                reporter.report(&InvocationFault {
                    request_id,
                    command,
                    author,
                    kind: FaultKind::TimedOut(limit),
                });
                // Abort only lands at the next await point.
                let _ = task.await;
                return;
            }
        },
        None => task.await,
    };

    let kind = match joined {
        Ok(Ok(())) => {
            debug!(
                "[{request_id}] ✅ `{command}` completed in {:?}",
                started.elapsed()
            );
            return;
        }
        Ok(Err(e)) => FaultKind::Failed(e),
        Err(e) if e.is_panic() => FaultKind::Panicked(panic_message(e.into_panic().as_ref())),
        Err(e) => {
            warn!("[{request_id}] `{command}` was cancelled: {e}");
            return;
        }
    };

    reporter.report(&InvocationFault {
        request_id,
        command,
        author,
        kind,
    });
}
