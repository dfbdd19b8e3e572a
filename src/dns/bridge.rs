//! Descriptor bridge between the resolver engine and the event loop.
//!
//! The engine tells us which descriptors it cares about via socket-state
//! callbacks; the loop tells us when those descriptors are ready. The
//! bridge keeps the fd -> interest tracking table that lets it translate
//! each state change into an incremental register/update/unregister on
//! the loop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::BitOr;
use std::rc::Rc;

use crate::dns::engine::{ResolverEngine, SocketFd, SOCKET_BAD};

/// Read/write interest in a descriptor, at least one bit set.
///
/// Construction goes through [`Interest::from_flags`], which returns
/// `None` for the all-clear case, so a tracked descriptor always carries
/// a non-empty mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interest(u8);

impl Interest {
    pub const READABLE: Interest = Interest(0b01);
    pub const WRITABLE: Interest = Interest(0b10);

    /// Collapses the engine's readable/writable flags into a mask, or
    /// `None` when both are clear.
    pub fn from_flags(readable: bool, writable: bool) -> Option<Interest> {
        let mut bits = 0;
        if readable {
            bits |= Interest::READABLE.0;
        }
        if writable {
            bits |= Interest::WRITABLE.0;
        }
        (bits != 0).then_some(Interest(bits))
    }

    pub fn is_readable(self) -> bool {
        self.0 & Interest::READABLE.0 != 0
    }

    pub fn is_writable(self) -> bool {
        self.0 & Interest::WRITABLE.0 != 0
    }
}

impl BitOr for Interest {
    type Output = Interest;

    fn bitor(self, rhs: Interest) -> Interest {
        Interest(self.0 | rhs.0)
    }
}

/// Readiness callback handed to the loop at registration time:
/// `(fd, ready_events)`.
pub type DispatchFn = Rc<dyn Fn(SocketFd, Interest)>;

/// The host event loop's descriptor-readiness multiplexer.
///
/// Semantics match the usual poller contract: registering an fd twice,
/// or updating/unregistering an fd that is not currently watched, is a
/// caller bug and may fail arbitrarily.
pub trait EventLoop {
    /// Starts watching `fd`; `callback` is invoked with the ready events
    /// whenever the descriptor becomes ready.
    fn register_descriptor(&self, fd: SocketFd, interest: Interest, callback: DispatchFn);

    /// Changes the interest mask for an already-watched `fd`.
    fn update_descriptor(&self, fd: SocketFd, interest: Interest);

    /// Stops watching `fd`.
    fn unregister_descriptor(&self, fd: SocketFd);
}

/// Mirrors engine socket-state events into event-loop registrations.
///
/// Tracking-table invariant: an entry exists for an fd iff the last
/// state change reported for it had at least one interest bit set. The
/// engine is the only party that creates or clears interest; the bridge
/// never fabricates entries on its own.
pub struct DescriptorBridge<L, E> {
    event_loop: Rc<L>,
    engine: Rc<E>,
    tracked: RefCell<HashMap<SocketFd, Interest>>,
    // One dispatch callback shared by every registration.
    dispatch: DispatchFn,
}

impl<L, E> DescriptorBridge<L, E>
where
    L: EventLoop + 'static,
    E: ResolverEngine + 'static,
{
    pub fn new(event_loop: Rc<L>, engine: Rc<E>) -> Rc<Self> {
        Rc::new_cyclic(|weak: &std::rc::Weak<Self>| {
            let weak = weak.clone();
            let dispatch: DispatchFn = Rc::new(move |fd, events| {
                if let Some(bridge) = weak.upgrade() {
                    bridge.dispatch(fd, events);
                }
            });
            Self {
                event_loop,
                engine,
                tracked: RefCell::new(HashMap::new()),
                dispatch,
            }
        })
    }

    /// Handles one socket-state change from the engine.
    ///
    /// # Panics
    ///
    /// Panics if the engine clears interest in a descriptor the bridge
    /// never tracked. That breaks the callback contract and means the
    /// registration table can no longer be trusted.
    pub fn on_socket_state_change(&self, fd: SocketFd, readable: bool, writable: bool) {
        match Interest::from_flags(readable, writable) {
            None => {
                let removed = self.tracked.borrow_mut().remove(&fd);
                assert!(
                    removed.is_some(),
                    "engine cleared interest in untracked descriptor {fd}"
                );
                self.event_loop.unregister_descriptor(fd);
                tracing::trace!(fd, "descriptor unregistered");
            }
            Some(interest) => {
                let previous = self.tracked.borrow_mut().insert(fd, interest);
                if previous.is_some() {
                    self.event_loop.update_descriptor(fd, interest);
                    tracing::trace!(
                        fd,
                        readable = interest.is_readable(),
                        writable = interest.is_writable(),
                        "descriptor interest updated"
                    );
                } else {
                    self.event_loop
                        .register_descriptor(fd, interest, Rc::clone(&self.dispatch));
                    tracing::trace!(
                        fd,
                        readable = interest.is_readable(),
                        writable = interest.is_writable(),
                        "descriptor registered"
                    );
                }
            }
        }
    }

    /// Current interest for `fd`, `None` when untracked.
    pub fn interest(&self, fd: SocketFd) -> Option<Interest> {
        self.tracked.borrow().get(&fd).copied()
    }

    // Readiness from the loop: split the events back into per-direction
    // descriptors and hand them to the engine. The engine may re-enter
    // `on_socket_state_change` and fire completion callbacks from here.
    fn dispatch(&self, fd: SocketFd, events: Interest) {
        let read_fd = if events.is_readable() { fd } else { SOCKET_BAD };
        let write_fd = if events.is_writable() { fd } else { SOCKET_BAD };
        self.engine.process_descriptors(read_fd, write_fd);
    }
}
