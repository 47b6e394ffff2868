//! # Command System
//!
//! Prefix (`!`) command handling for Discord messages.
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Bounded invocation pool with fault reporting
//! - 2.0.0: Alias resolution and permission requirements
//! - 1.0.0: Initial prefix command registry and dispatcher

pub mod context;
pub mod dispatcher;
pub mod fault;
pub mod handler;
pub mod handlers;
pub mod parser;
pub mod permission;
pub mod pool;
pub mod registry;

pub use context::InvocationContext;
pub use dispatcher::{DefaultSourcePolicy, Dispatch, Dispatcher, Rejection, SourcePolicy};
pub use fault::{FaultKind, FaultReporter, InvocationFault, LogFaultReporter};
pub use handler::Command;
pub use handlers::create_builtin_commands;
pub use parser::{parse, ParsedInvocation};
pub use permission::Permission;
pub use pool::{InvocationHandle, InvocationPool, Overloaded, PoolConfig};
pub use registry::Registry;
