//! Client library for the sedimentd object bus
//!
//! Reaching a remote object is a three-step pipeline:
//! - `ObjectPath::new()` validates an address before anything touches the bus
//! - `ServiceIdentity::resolve()` binds identity + path into a `Proxy`
//! - `BusClient` performs the round trip and classifies the outcome
//!
//! Existence of a remote object is a time-varying fact, so it is decided
//! only at invocation time: a proxy for a dead path resolves fine, and
//! every invocation through it comes back as a rejection carrying the
//! unknown-method fault name.

mod client;
mod descriptor;
mod error;
pub mod interfaces;
mod proxy;

pub use client::BusClient;
pub use descriptor::{InterfaceDescriptor, MethodDescriptor, PropertyDescriptor, ValueKind};
pub use error::{DecodeError, InvokeError};
pub use proxy::{Proxy, ServiceIdentity};

pub use sediment_protocol::{
    socket_path, CallKind, Fault, ObjectPath, PathError, FAULT_ACCESS_DENIED, FAULT_FAILED,
    FAULT_INVALID_ARGS, FAULT_SERVICE_UNKNOWN, FAULT_UNKNOWN_INTERFACE, FAULT_UNKNOWN_METHOD,
    FAULT_UNKNOWN_PROPERTY, SEDIMENTD_BUS_NAME, SEDIMENTD_MANAGER_PATH,
};
