//! Base types and error handling.
//!
//! Foundational types shared across the crate:
//! - [`DnsError`]: every failure the resolution adapter can surface
//! - [`Family`]: address family requested by or inferred for an address
//!
//! [`DnsError`]: error::DnsError
//! [`Family`]: family::Family

pub mod error;
pub mod family;
