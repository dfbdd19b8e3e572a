//! Query adapter: awaitable resolution on top of engine callbacks.
//!
//! Each entry point issues exactly one engine call, parks the caller on a
//! oneshot channel, and resumes it when the engine's completion callback
//! fires. The engine guarantees the callback fires at most once and never
//! inline with the initiating call, so the suspend-then-resume pattern
//! cannot race with its own initiation.

use std::net::IpAddr;
use std::rc::Rc;

use tokio::sync::oneshot;

use crate::base::error::DnsError;
use crate::base::family::Family;
use crate::dns::bridge::{DescriptorBridge, EventLoop};
use crate::dns::engine::ResolverEngine;
use crate::dns::record::RecordType;

/// One resolved address: inferred family, textual address, caller's port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrInfo {
    pub family: Family,
    pub address: String,
    pub port: u16,
}

/// Non-blocking resolver backed by an injected engine and event loop.
///
/// Construction wires the engine's socket-state callback into a
/// [`DescriptorBridge`] for the given loop; after that, socket traffic is
/// driven entirely by loop readiness and the caller only sees `async`
/// methods.
///
/// Cancellation is not supported: once a lookup is issued there is no way
/// to abort it, and this layer adds no timeout of its own.
pub struct AresResolver<E, L> {
    engine: Rc<E>,
    // Held for its registrations; the engine only knows it weakly.
    _bridge: Rc<DescriptorBridge<L, E>>,
}

impl<E, L> AresResolver<E, L>
where
    E: ResolverEngine + 'static,
    L: EventLoop + 'static,
{
    /// Wires `engine` to `event_loop` and returns the resolver.
    ///
    /// The bridge is installed as the engine's socket-state callback via
    /// a weak handle, so dropping the resolver turns later state changes
    /// into no-ops instead of keeping the bridge alive.
    pub fn new(engine: Rc<E>, event_loop: Rc<L>) -> Self {
        let bridge = DescriptorBridge::new(event_loop, Rc::clone(&engine));
        let hook = Rc::downgrade(&bridge);
        engine.set_socket_state_callback(Box::new(move |fd, readable, writable| {
            if let Some(bridge) = hook.upgrade() {
                bridge.on_socket_state_change(fd, readable, writable);
            }
        }));
        Self {
            engine,
            _bridge: bridge,
        }
    }

    /// Resolves `host` to a list of addresses carrying `port`.
    ///
    /// IP literals short-circuit: no engine call is made and the literal
    /// comes back as the sole answer. Otherwise the call suspends until
    /// the engine completes the forward lookup.
    ///
    /// When `family` is concrete, every answer must match it or the whole
    /// call fails with [`DnsError::FamilyMismatch`]; mismatches are never
    /// silently filtered out. Answer order is the engine's.
    pub async fn resolve(
        &self,
        host: &str,
        port: u16,
        family: Family,
    ) -> Result<Vec<AddrInfo>, DnsError> {
        let addresses = if host.parse::<IpAddr>().is_ok() {
            vec![host.to_string()]
        } else {
            tracing::debug!(host, requested = %family, "forward lookup via resolver engine");
            let (tx, rx) = oneshot::channel();
            self.engine.lookup_forward(
                host,
                family,
                Box::new(move |result, code| {
                    let _ = tx.send((result, code));
                }),
            );
            let (result, code) = rx
                .await
                .map_err(|_| DnsError::Canceled(host.to_string()))?;
            if code != 0 {
                let message = self.engine.describe_error(code);
                tracing::debug!(host, code, message = %message, "engine reported lookup failure");
                return Err(DnsError::Engine {
                    code,
                    message,
                    host: host.to_string(),
                });
            }
            let reply = result.ok_or_else(|| missing_payload(host))?;
            tracing::debug!(host, count = reply.addresses.len(), "forward lookup complete");
            reply.addresses
        };

        let mut addrinfo = Vec::with_capacity(addresses.len());
        for address in addresses {
            let inferred = Family::infer(&address);
            if family != Family::Unspec && family != inferred {
                return Err(DnsError::FamilyMismatch {
                    requested: family,
                    actual: inferred,
                    address,
                });
            }
            addrinfo.push(AddrInfo {
                family: inferred,
                address,
                port,
            });
        }
        Ok(addrinfo)
    }

    /// Issues a typed record query and returns the engine's raw result.
    ///
    /// `record_type` is matched case-insensitively against the supported
    /// set (A, AAAA, CNAME, MX, NAPTR, NS, PTR, SOA, SRV, TXT); anything
    /// else fails with [`DnsError::UnsupportedRecordType`] before the
    /// engine is involved. On success the engine's result is passed
    /// through unmodified; its shape depends on the record type.
    pub async fn query(&self, hostname: &str, record_type: &str) -> Result<E::Records, DnsError> {
        let rtype: RecordType = record_type.parse()?;

        tracing::debug!(hostname, record_type = %rtype, "typed query via resolver engine");
        let (tx, rx) = oneshot::channel();
        self.engine.lookup_typed(
            hostname,
            rtype,
            Box::new(move |result, code| {
                let _ = tx.send((result, code));
            }),
        );
        let (result, code) = rx
            .await
            .map_err(|_| DnsError::Canceled(hostname.to_string()))?;
        if code != 0 {
            let message = self.engine.describe_error(code);
            tracing::debug!(hostname, code, message = %message, "engine reported query failure");
            return Err(DnsError::Engine {
                code,
                message,
                host: hostname.to_string(),
            });
        }
        result.ok_or_else(|| missing_payload(hostname))
    }
}

// A zero code with no payload breaks the completion contract; report it
// as an engine failure rather than inventing an empty result.
fn missing_payload(host: &str) -> DnsError {
    DnsError::Engine {
        code: 0,
        message: "completion callback carried no result".to_string(),
        host: host.to_string(),
    }
}
