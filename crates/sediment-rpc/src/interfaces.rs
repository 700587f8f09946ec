//! Well-known sedimentd interfaces and typed wrappers over them.
//!
//! The descriptors are the static data contract the invoker interprets;
//! the wrapper types turn checked reply values into plain Rust types.

use sediment_protocol::ObjectPath;
use serde_json::{Map, Value};

use crate::client::BusClient;
use crate::descriptor::{InterfaceDescriptor, MethodDescriptor, PropertyDescriptor, ValueKind};
use crate::error::{DecodeError, InvokeError};
use crate::proxy::Proxy;

/// Top-level management interface, served at the manager object.
pub const MANAGER: InterfaceDescriptor = InterfaceDescriptor {
    name: "org.sediment.Manager1",
    methods: &[
        MethodDescriptor {
            name: "CreatePool",
            args: &[ValueKind::String, ValueKind::Array],
            returns: ValueKind::String,
        },
        MethodDescriptor {
            name: "DestroyPool",
            args: &[ValueKind::String],
            returns: ValueKind::Bool,
        },
    ],
    properties: &[PropertyDescriptor {
        name: "Version",
        kind: ValueKind::String,
        writable: false,
    }],
};

/// Object enumeration interface, served at the manager object.
pub const OBJECT_MANAGER: InterfaceDescriptor = InterfaceDescriptor {
    name: "org.sediment.ObjectManager1",
    methods: &[MethodDescriptor {
        name: "GetManagedObjects",
        args: &[],
        returns: ValueKind::Dict,
    }],
    properties: &[],
};

/// Per-pool interface, served at each pool object.
pub const POOL: InterfaceDescriptor = InterfaceDescriptor {
    name: "org.sediment.Pool1",
    methods: &[],
    properties: &[
        PropertyDescriptor {
            name: "Name",
            kind: ValueKind::String,
            writable: true,
        },
        PropertyDescriptor {
            name: "Uuid",
            kind: ValueKind::String,
            writable: false,
        },
    ],
};

fn expect_string(member: &str, value: Value) -> Result<String, InvokeError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(DecodeError::Signature {
            member: member.to_string(),
            expected: ValueKind::String,
        }
        .into()),
    }
}

/// Typed access to `org.sediment.Manager1`.
pub struct Manager;

impl Manager {
    pub async fn version(client: &BusClient, proxy: &Proxy) -> Result<String, InvokeError> {
        let value = client.get_property(proxy, &MANAGER, "Version").await?;
        expect_string("Version", value)
    }

    /// Create a pool and return the object path it is now served at.
    pub async fn create_pool(
        client: &BusClient,
        proxy: &Proxy,
        name: &str,
        devices: &[&str],
    ) -> Result<ObjectPath, InvokeError> {
        let devices: Vec<Value> = devices.iter().map(|d| Value::from(*d)).collect();
        let args = vec![Value::from(name), Value::from(devices)];
        let value = client.call_method(proxy, &MANAGER, "CreatePool", args).await?;
        let raw = expect_string("CreatePool", value)?;
        ObjectPath::new(raw).map_err(|source| {
            InvokeError::from(DecodeError::Path {
                member: "CreatePool".to_string(),
                source,
            })
        })
    }

    /// Destroy a pool by name; `true` when a pool was actually destroyed.
    pub async fn destroy_pool(
        client: &BusClient,
        proxy: &Proxy,
        name: &str,
    ) -> Result<bool, InvokeError> {
        let value = client
            .call_method(proxy, &MANAGER, "DestroyPool", vec![Value::from(name)])
            .await?;
        match value {
            Value::Bool(destroyed) => Ok(destroyed),
            _ => Err(DecodeError::Signature {
                member: "DestroyPool".to_string(),
                expected: ValueKind::Bool,
            }
            .into()),
        }
    }
}

/// Typed access to `org.sediment.ObjectManager1`.
pub struct ObjectManager;

impl ObjectManager {
    /// Enumerate every object the endpoint serves, with the interfaces
    /// and current property values of each.
    pub async fn get_managed_objects(
        client: &BusClient,
        proxy: &Proxy,
    ) -> Result<Map<String, Value>, InvokeError> {
        let value = client
            .call_method(proxy, &OBJECT_MANAGER, "GetManagedObjects", Vec::new())
            .await?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(DecodeError::Signature {
                member: "GetManagedObjects".to_string(),
                expected: ValueKind::Dict,
            }
            .into()),
        }
    }
}

/// Typed access to `org.sediment.Pool1`.
pub struct Pool;

impl Pool {
    pub async fn name(client: &BusClient, proxy: &Proxy) -> Result<String, InvokeError> {
        let value = client.get_property(proxy, &POOL, "Name").await?;
        expect_string("Name", value)
    }

    /// Rename the pool.
    pub async fn set_name(
        client: &BusClient,
        proxy: &Proxy,
        name: &str,
    ) -> Result<(), InvokeError> {
        client
            .set_property(proxy, &POOL, "Name", Value::from(name))
            .await
    }

    pub async fn uuid(client: &BusClient, proxy: &Proxy) -> Result<String, InvokeError> {
        let value = client.get_property(proxy, &POOL, "Uuid").await?;
        expect_string("Uuid", value)
    }
}
