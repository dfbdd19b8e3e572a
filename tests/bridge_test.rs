//! Descriptor Bridge Tests
//!
//! Covers:
//! - fd tracking table vs. engine socket-state sequences
//! - incremental register/update/unregister against the event loop
//! - readiness dispatch back into the engine

use aresnet::dns::{
    DescriptorBridge, DispatchFn, EventLoop, Family, HostCallback, Interest, RecordCallback,
    RecordType, ResolverEngine, SocketFd, SocketStateFn, SOCKET_BAD,
};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq)]
enum LoopOp {
    Register(SocketFd, Interest),
    Update(SocketFd, Interest),
    Unregister(SocketFd),
}

/// Fake multiplexer with poller semantics: double registration and
/// update/unregister of an unwatched fd are hard failures.
#[derive(Default)]
struct RecordingLoop {
    ops: RefCell<Vec<LoopOp>>,
    handlers: RefCell<HashMap<SocketFd, DispatchFn>>,
}

impl RecordingLoop {
    fn fire(&self, fd: SocketFd, events: Interest) {
        let handler = self
            .handlers
            .borrow()
            .get(&fd)
            .cloned()
            .expect("readiness for unwatched fd");
        handler(fd, events);
    }

    fn is_watched(&self, fd: SocketFd) -> bool {
        self.handlers.borrow().contains_key(&fd)
    }
}

impl EventLoop for RecordingLoop {
    fn register_descriptor(&self, fd: SocketFd, interest: Interest, callback: DispatchFn) {
        let previous = self.handlers.borrow_mut().insert(fd, callback);
        assert!(previous.is_none(), "fd {fd} registered twice");
        self.ops.borrow_mut().push(LoopOp::Register(fd, interest));
    }

    fn update_descriptor(&self, fd: SocketFd, interest: Interest) {
        assert!(
            self.handlers.borrow().contains_key(&fd),
            "update for unwatched fd {fd}"
        );
        self.ops.borrow_mut().push(LoopOp::Update(fd, interest));
    }

    fn unregister_descriptor(&self, fd: SocketFd) {
        let removed = self.handlers.borrow_mut().remove(&fd);
        assert!(removed.is_some(), "unregister for unwatched fd {fd}");
        self.ops.borrow_mut().push(LoopOp::Unregister(fd));
    }
}

/// Fake engine that only records `process_descriptors` calls; the bridge
/// tests never issue lookups.
#[derive(Default)]
struct RecordingEngine {
    processed: RefCell<Vec<(SocketFd, SocketFd)>>,
}

impl ResolverEngine for RecordingEngine {
    type Records = ();

    fn set_socket_state_callback(&self, _callback: SocketStateFn) {}

    fn process_descriptors(&self, read_fd: SocketFd, write_fd: SocketFd) {
        self.processed.borrow_mut().push((read_fd, write_fd));
    }

    fn lookup_forward(&self, _host: &str, _family: Family, _done: HostCallback) {
        unreachable!("bridge tests issue no lookups");
    }

    fn lookup_typed(
        &self,
        _host: &str,
        _record_type: RecordType,
        _done: RecordCallback<Self::Records>,
    ) {
        unreachable!("bridge tests issue no lookups");
    }

    fn describe_error(&self, code: i32) -> String {
        format!("ares error {code}")
    }
}

fn setup() -> (
    Rc<RecordingLoop>,
    Rc<RecordingEngine>,
    Rc<DescriptorBridge<RecordingLoop, RecordingEngine>>,
) {
    let event_loop = Rc::new(RecordingLoop::default());
    let engine = Rc::new(RecordingEngine::default());
    let bridge = DescriptorBridge::new(Rc::clone(&event_loop), Rc::clone(&engine));
    (event_loop, engine, bridge)
}

#[test]
fn test_register_update_unregister_sequence() {
    let (event_loop, _engine, bridge) = setup();

    bridge.on_socket_state_change(7, true, false);
    bridge.on_socket_state_change(7, true, true);
    bridge.on_socket_state_change(7, false, true);
    bridge.on_socket_state_change(7, false, false);

    assert_eq!(
        *event_loop.ops.borrow(),
        vec![
            LoopOp::Register(7, Interest::READABLE),
            LoopOp::Update(7, Interest::READABLE | Interest::WRITABLE),
            LoopOp::Update(7, Interest::WRITABLE),
            LoopOp::Unregister(7),
        ]
    );
}

#[test]
fn test_tracking_entry_exists_iff_last_mask_nonzero() {
    let (_event_loop, _engine, bridge) = setup();

    assert_eq!(bridge.interest(3), None);

    bridge.on_socket_state_change(3, false, true);
    assert_eq!(bridge.interest(3), Some(Interest::WRITABLE));

    bridge.on_socket_state_change(3, true, true);
    assert_eq!(
        bridge.interest(3),
        Some(Interest::READABLE | Interest::WRITABLE)
    );

    bridge.on_socket_state_change(3, false, false);
    assert_eq!(bridge.interest(3), None);
}

#[test]
fn test_reregister_after_removal_is_fresh_registration() {
    let (event_loop, _engine, bridge) = setup();

    bridge.on_socket_state_change(5, true, false);
    bridge.on_socket_state_change(5, false, false);
    bridge.on_socket_state_change(5, true, false);

    assert_eq!(
        *event_loop.ops.borrow(),
        vec![
            LoopOp::Register(5, Interest::READABLE),
            LoopOp::Unregister(5),
            LoopOp::Register(5, Interest::READABLE),
        ]
    );
    assert!(event_loop.is_watched(5));
}

#[test]
#[should_panic(expected = "untracked descriptor")]
fn test_clearing_untracked_descriptor_panics() {
    let (_event_loop, _engine, bridge) = setup();
    bridge.on_socket_state_change(9, false, false);
}

#[test]
fn test_dispatch_splits_readiness_per_direction() {
    let (event_loop, engine, bridge) = setup();
    bridge.on_socket_state_change(4, true, true);

    event_loop.fire(4, Interest::READABLE);
    event_loop.fire(4, Interest::WRITABLE);
    event_loop.fire(4, Interest::READABLE | Interest::WRITABLE);

    assert_eq!(
        *engine.processed.borrow(),
        vec![(4, SOCKET_BAD), (SOCKET_BAD, 4), (4, 4)]
    );
}

#[test]
fn test_dispatch_callback_is_shared_across_descriptors() {
    let (event_loop, engine, bridge) = setup();
    bridge.on_socket_state_change(10, true, false);
    bridge.on_socket_state_change(11, false, true);

    event_loop.fire(10, Interest::READABLE);
    event_loop.fire(11, Interest::WRITABLE);

    assert_eq!(
        *engine.processed.borrow(),
        vec![(10, SOCKET_BAD), (SOCKET_BAD, 11)]
    );
}
