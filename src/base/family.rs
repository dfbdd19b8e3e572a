//! Address family classification.

use std::fmt;

/// Address family of a resolved or requested address.
///
/// `Unspec` means "no constraint" when passed as a request and "neither
/// IPv4 nor IPv6 textual form" when inferred from an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Unspec,
    V4,
    V6,
}

impl Family {
    /// Infers the family of an address from its textual form.
    ///
    /// A `':'` anywhere marks IPv6 (this also classifies mixed notation
    /// like `::ffff:192.0.2.1` as IPv6), otherwise a `'.'` marks IPv4,
    /// otherwise the family is unspecified.
    pub fn infer(address: &str) -> Family {
        if address.contains(':') {
            Family::V6
        } else if address.contains('.') {
            Family::V4
        } else {
            Family::Unspec
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Unspec => "unspecified",
            Family::V4 => "IPv4",
            Family::V6 => "IPv6",
        };
        f.write_str(name)
    }
}
