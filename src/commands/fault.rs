//! Invocation faults and their reporting
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::error;
use serenity::model::id::UserId;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum FaultKind {
    #[error("command failed: {0:#}")]
    Failed(anyhow::Error),
    #[error("command panicked: {0}")]
    Panicked(String),
    #[error("command did not finish within {0:?}")]
    TimedOut(Duration),
}

/// A command invocation that did not complete successfully
#[derive(Debug, Error)]
#[error("[{request_id}] `{command}` invoked by {author}: {kind}")]
pub struct InvocationFault {
    pub request_id: Uuid,
    pub command: String,
    pub author: UserId,
    #[source]
    pub kind: FaultKind,
}

/// Receives faults caught at the invocation boundary
pub trait FaultReporter: Send + Sync {
    fn report(&self, fault: &InvocationFault);
}

/// Writes faults to the error log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFaultReporter;

impl FaultReporter for LogFaultReporter {
    fn report(&self, fault: &InvocationFault) {
        error!("{fault}");
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
