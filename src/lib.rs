//! # aresnet
//!
//! An event-loop adapter for callback-driven asynchronous DNS resolver
//! engines in the style of c-ares.
//!
//! `aresnet` does not implement any DNS protocol logic itself. The engine
//! (packet parsing, retries, timeouts, server selection) and the I/O
//! multiplexer are external collaborators, injected as trait objects. What
//! this crate provides is the glue between the two models:
//!
//! - [`dns::DescriptorBridge`] mirrors the engine's per-descriptor
//!   read/write interest into the event loop's registration table and
//!   feeds readiness back into the engine's protocol processing.
//! - [`dns::AresResolver`] exposes the engine's one-shot completion
//!   callbacks as ordinary `async` calls: forward hostname resolution and
//!   typed record queries, each suspending until the engine completes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aresnet::dns::{AresResolver, Family};
//! use std::rc::Rc;
//!
//! let resolver = AresResolver::new(engine, event_loop);
//! let addrs = resolver.resolve("example.com", 443, Family::Unspec).await?;
//! for addr in addrs {
//!     println!("{} -> {}:{}", addr.family, addr.address, addr.port);
//! }
//! ```
//!
//! ## Concurrency model
//!
//! Everything here is single-threaded and cooperative, matching the host
//! event loop: state is shared through `Rc`/`RefCell`, futures are not
//! `Send`, and the only suspension point is the wait for an engine
//! completion callback. Run queries on a current-thread runtime or inside
//! a `tokio::task::LocalSet`.
//!
//! ## Modules
//!
//! - [`base`] - Address families and error definitions
//! - [`dns`] - The descriptor bridge and the query adapter

pub mod base;
pub mod dns;
