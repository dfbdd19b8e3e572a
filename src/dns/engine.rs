//! The resolver engine boundary.
//!
//! The engine is an opaque, non-blocking DNS client (c-ares or a
//! workalike). It owns all protocol work: packet parsing, retries,
//! timeouts, server selection. This module only fixes the shape of the
//! calls crossing the boundary.
//!
//! # Callback contract
//!
//! - The socket-state callback may fire arbitrarily often, for any fd,
//!   interleaved arbitrarily with reads and writes on that fd.
//! - A completion callback fires at most once per query, strictly after
//!   the initiating lookup call has returned, never inline.

use crate::base::family::Family;
use crate::dns::record::RecordType;

/// Raw descriptor handle as the engine reports it.
pub type SocketFd = std::os::raw::c_int;

/// Sentinel passed to [`ResolverEngine::process_descriptors`] for a
/// direction with no ready descriptor (`ARES_SOCKET_BAD`).
pub const SOCKET_BAD: SocketFd = -1;

/// Socket-state callback: `(fd, readable, writable)`. Both flags clear
/// means the engine is done with the descriptor.
pub type SocketStateFn = Box<dyn Fn(SocketFd, bool, bool)>;

/// Completion callback for a forward host lookup.
///
/// Receives the result and the engine's error code; a zero code means
/// success. One-shot, hence `FnOnce`.
pub type HostCallback = Box<dyn FnOnce(Option<HostAddresses>, i32)>;

/// Completion callback for a typed record query. Same `(result, code)`
/// convention as [`HostCallback`].
pub type RecordCallback<R> = Box<dyn FnOnce(Option<R>, i32)>;

/// Successful forward-lookup payload: the answer addresses in textual
/// form, in the order the engine produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostAddresses {
    pub addresses: Vec<String>,
}

/// The resolver engine as seen by this crate.
///
/// Implementations wrap the actual DNS client library. All methods take
/// `&self`; engines are expected to use interior mutability, matching the
/// single-threaded cooperative model of the host loop.
pub trait ResolverEngine {
    /// Engine-defined result of a typed record query. Opaque to the
    /// adapter; callers know the shape per record type.
    type Records;

    /// Installs the callback invoked on every socket-state change. Called
    /// once, at wiring time, before any lookup is issued.
    fn set_socket_state_callback(&self, callback: SocketStateFn);

    /// Drives protocol processing for whichever descriptor is ready.
    /// Either argument may be [`SOCKET_BAD`] when that direction has no
    /// ready descriptor.
    ///
    /// May re-enter the socket-state callback and may fire completion
    /// callbacks for any in-flight query before returning.
    fn process_descriptors(&self, read_fd: SocketFd, write_fd: SocketFd);

    /// Starts a forward lookup of `host` restricted to `family`.
    fn lookup_forward(&self, host: &str, family: Family, done: HostCallback);

    /// Starts a typed record query for `host`.
    fn lookup_typed(&self, host: &str, record_type: RecordType, done: RecordCallback<Self::Records>);

    /// Human-readable description of an engine error code
    /// (`ares_strerror`).
    fn describe_error(&self, code: i32) -> String;
}
