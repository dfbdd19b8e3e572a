//! DNS Resolution Adapter
//!
//! Bridges a callback-driven resolver engine (c-ares style) onto a
//! readiness-based event loop:
//! - Descriptor bridge: engine socket-state events -> loop registrations,
//!   loop readiness -> engine protocol processing
//! - Query adapter: one-shot completion callbacks -> awaitable calls
//!
//! # Architecture
//!
//! The engine and the event loop are both injected as traits
//! ([`ResolverEngine`], [`EventLoop`]); nothing in this module resolves
//! them from ambient process-wide state, and nothing here implements DNS
//! itself. Control flow for a query:
//!
//! ```text
//! resolve/query -> engine lookup -> engine opens sockets
//!    -> socket-state callback -> bridge registers fds with the loop
//!    -> loop reports readiness -> bridge hands the fd to the engine
//!    -> engine finishes the query -> completion callback resumes caller
//! ```

mod bridge;
mod engine;
mod record;
mod resolver;

pub use bridge::{DescriptorBridge, DispatchFn, EventLoop, Interest};
pub use engine::{
    HostAddresses, HostCallback, RecordCallback, ResolverEngine, SocketFd, SocketStateFn,
    SOCKET_BAD,
};
pub use record::RecordType;
pub use resolver::{AddrInfo, AresResolver};

pub use crate::base::{error::DnsError, family::Family};
