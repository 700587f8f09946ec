use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::path::ObjectPath;

/// No object at the path, or no such member on a live object.
pub const FAULT_UNKNOWN_METHOD: &str = "org.sediment.Error.UnknownMethod";
/// Live object, but it does not serve the requested interface.
pub const FAULT_UNKNOWN_INTERFACE: &str = "org.sediment.Error.UnknownInterface";
/// Live object and interface, but no property under that name.
pub const FAULT_UNKNOWN_PROPERTY: &str = "org.sediment.Error.UnknownProperty";
/// The destination bus name is not served by this endpoint.
pub const FAULT_SERVICE_UNKNOWN: &str = "org.sediment.Error.ServiceUnknown";
/// Argument count or shape rejected by the remote schema, or an
/// unparseable call.
pub const FAULT_INVALID_ARGS: &str = "org.sediment.Error.InvalidArgs";
/// Write to a read-only property.
pub const FAULT_ACCESS_DENIED: &str = "org.sediment.Error.AccessDenied";
/// The endpoint understood the call but could not carry it out.
pub const FAULT_FAILED: &str = "org.sediment.Error.Failed";

/// Well-known bus name sedimentd serves under.
pub const SEDIMENTD_BUS_NAME: &str = "org.sediment.Sediment1";
/// Object path of the sedimentd manager object.
pub const SEDIMENTD_MANAGER_PATH: &str = "/org/sediment/Manager";

/// Structured rejection returned in lieu of a result, identified by a
/// fixed symbolic name callers branch on.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{name}: {message}")]
pub struct Fault {
    pub name: String,
    pub message: String,
}

impl Fault {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Which invocation shape a call carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    MethodCall,
    PropertyGet,
    PropertySet,
}

/// One invocation sent to an endpoint: which object, which interface
/// member, which shape, which arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallMessage {
    pub id: u64,
    pub destination: String,
    pub path: ObjectPath,
    pub interface: String,
    pub member: String,
    pub kind: CallKind,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Reply to one call. Exactly one of `result`/`fault` is set; `id` is
/// absent only when the call could not be parsed at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<Fault>,
}

impl ReplyMessage {
    pub fn success(id: u64, result: impl Into<Value>) -> Self {
        Self {
            id: Some(id),
            result: Some(result.into()),
            fault: None,
        }
    }

    pub fn fault(id: impl Into<Option<u64>>, fault: Fault) -> Self {
        Self {
            id: id.into(),
            result: None,
            fault: Some(fault),
        }
    }
}
