//! Invocation outcome classification
//!
//! Three layers of failure collapse into one taxonomy callers can branch
//! on by kind. Path validation never reaches this module; it fails before
//! a proxy exists.

use std::io;

use sediment_protocol::{Fault, PathError};
use thiserror::Error;

use crate::descriptor::ValueKind;

/// A reply arrived but did not match the declared contract.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("reply was not a valid protocol message")]
    Json(#[from] serde_json::Error),
    #[error("reply answered call {got:?}, expected {sent}")]
    IdMismatch { sent: u64, got: Option<u64> },
    #[error("`{member}` reply does not match its declared `{expected}` signature")]
    Signature { member: String, expected: ValueKind },
    #[error("interface `{interface}` declares no member `{member}`")]
    UnknownMember { interface: String, member: String },
    #[error("`{member}` returned a malformed object path")]
    Path {
        member: String,
        #[source]
        source: PathError,
    },
}

/// Classified outcome of one remote invocation.
///
/// - `Rejected`: the remote endpoint actively returned a protocol fault.
///   The fault's symbolic name is preserved and the fault itself is the
///   error's source, so classification and cause are both inspectable.
/// - `Decode`: the remote answered but the reply failed its declared
///   signature. Distinct from `Rejected` so callers can tell a schema
///   mismatch apart from a remote rejection.
/// - `Transport`: the bus/daemon was unreachable or the connection died.
///   Passed through unmodified; no local recovery is possible.
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("remote endpoint rejected the call")]
    Rejected(#[source] Fault),
    #[error("could not decode remote reply")]
    Decode(#[from] DecodeError),
    #[error("bus transport failure")]
    Transport(#[from] io::Error),
}

impl InvokeError {
    /// The protocol fault behind a rejection, if that is what this is.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            InvokeError::Rejected(fault) => Some(fault),
            _ => None,
        }
    }

    /// Symbolic name of the rejection fault, e.g.
    /// `org.sediment.Error.UnknownMethod`.
    pub fn fault_name(&self) -> Option<&str> {
        self.fault().map(|fault| fault.name.as_str())
    }
}
