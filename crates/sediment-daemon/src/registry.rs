//! Object registry and call dispatch
//!
//! Routing rules, in the order a call hits them:
//! - the destination must match the advertised bus name (`ServiceUnknown`),
//! - a path with no live object answers `UnknownMethod`, whatever the
//!   member or invocation shape; callers cannot tell "never existed"
//!   from "already removed",
//! - a live object answers `UnknownInterface` / `UnknownMethod` /
//!   `UnknownProperty` for members it does not serve, `InvalidArgs` for
//!   schema violations, and `AccessDenied` for writes to read-only
//!   properties.

use std::collections::HashMap;

use sediment_protocol::{
    CallKind, CallMessage, Fault, ObjectPath, ReplyMessage, FAULT_ACCESS_DENIED, FAULT_FAILED,
    FAULT_INVALID_ARGS, FAULT_SERVICE_UNKNOWN, FAULT_UNKNOWN_INTERFACE, FAULT_UNKNOWN_METHOD,
    FAULT_UNKNOWN_PROPERTY, SEDIMENTD_BUS_NAME, SEDIMENTD_MANAGER_PATH,
};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::engine::SimEngine;

const MANAGER_IFACE: &str = "org.sediment.Manager1";
const OBJECT_MANAGER_IFACE: &str = "org.sediment.ObjectManager1";
const POOL_IFACE: &str = "org.sediment.Pool1";

#[derive(Debug, Clone)]
enum Served {
    Manager,
    Pool { name: String },
}

/// Everything the daemon serves on the bus: the object table and the
/// engine state behind it.
pub struct ObjectRegistry {
    bus_name: String,
    engine: SimEngine,
    objects: HashMap<ObjectPath, Served>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        let mut objects = HashMap::new();
        let manager = ObjectPath::new(SEDIMENTD_MANAGER_PATH).expect("static object path");
        objects.insert(manager, Served::Manager);
        Self {
            bus_name: SEDIMENTD_BUS_NAME.to_string(),
            engine: SimEngine::new(),
            objects,
        }
    }

    /// Answer one call. Total: every call gets a reply, success or fault.
    pub fn dispatch(&mut self, call: &CallMessage) -> ReplyMessage {
        if call.destination != self.bus_name {
            return ReplyMessage::fault(
                call.id,
                Fault::new(
                    FAULT_SERVICE_UNKNOWN,
                    format!("no service named `{}` on this bus", call.destination),
                ),
            );
        }
        let Some(served) = self.objects.get(&call.path).cloned() else {
            debug!(path = %call.path, member = %call.member, "call routed to no object");
            return ReplyMessage::fault(
                call.id,
                Fault::new(
                    FAULT_UNKNOWN_METHOD,
                    format!("no object at path {}", call.path),
                ),
            );
        };
        match served {
            Served::Manager => self.dispatch_manager(call),
            Served::Pool { name } => self.dispatch_pool(call, &name),
        }
    }

    fn dispatch_manager(&mut self, call: &CallMessage) -> ReplyMessage {
        match (call.interface.as_str(), call.kind) {
            (MANAGER_IFACE, CallKind::MethodCall) => match call.member.as_str() {
                "CreatePool" => self.create_pool(call),
                "DestroyPool" => self.destroy_pool(call),
                other => unknown_method(call, other),
            },
            (MANAGER_IFACE, CallKind::PropertyGet) => match call.member.as_str() {
                "Version" => ReplyMessage::success(call.id, self.engine.version()),
                other => unknown_property(call, other),
            },
            (MANAGER_IFACE, CallKind::PropertySet) => match call.member.as_str() {
                "Version" => access_denied(call, "Version"),
                other => unknown_property(call, other),
            },
            (OBJECT_MANAGER_IFACE, CallKind::MethodCall)
                if call.member == "GetManagedObjects" =>
            {
                ReplyMessage::success(call.id, Value::Object(self.managed_objects()))
            }
            (OBJECT_MANAGER_IFACE, CallKind::MethodCall) => unknown_method(call, &call.member),
            (OBJECT_MANAGER_IFACE, _) => unknown_property(call, &call.member),
            (other, _) => unknown_interface(call, other),
        }
    }

    fn dispatch_pool(&mut self, call: &CallMessage, pool_name: &str) -> ReplyMessage {
        if call.interface != POOL_IFACE {
            return unknown_interface(call, &call.interface);
        }
        match call.kind {
            CallKind::MethodCall => unknown_method(call, &call.member),
            CallKind::PropertyGet => match call.member.as_str() {
                "Name" => ReplyMessage::success(call.id, pool_name),
                "Uuid" => match self.engine.pool(pool_name) {
                    Some(info) => {
                        ReplyMessage::success(call.id, info.uuid.simple().to_string())
                    }
                    None => ReplyMessage::fault(
                        call.id,
                        Fault::new(
                            FAULT_FAILED,
                            format!("pool `{pool_name}` has no engine state"),
                        ),
                    ),
                },
                other => unknown_property(call, other),
            },
            CallKind::PropertySet => match call.member.as_str() {
                "Name" => self.rename_pool(call, pool_name),
                "Uuid" => access_denied(call, "Uuid"),
                other => unknown_property(call, other),
            },
        }
    }

    fn create_pool(&mut self, call: &CallMessage) -> ReplyMessage {
        let (Some(name), Some(devices)) = (
            call.args.first().and_then(Value::as_str),
            call.args.get(1).and_then(Value::as_array),
        ) else {
            return invalid_args(call, "CreatePool expects (name: string, devices: array)");
        };
        let mut device_names = Vec::with_capacity(devices.len());
        for device in devices {
            match device.as_str() {
                Some(d) => device_names.push(d.to_string()),
                None => return invalid_args(call, "device entries must be strings"),
            }
        }

        let uuid = match self.engine.create_pool(name, device_names) {
            Ok(uuid) => uuid,
            Err(e) => {
                return ReplyMessage::fault(call.id, Fault::new(FAULT_FAILED, e.to_string()))
            }
        };
        let path = match ObjectPath::new(format!("/org/sediment/pool/{}", uuid.simple())) {
            Ok(path) => path,
            Err(e) => {
                return ReplyMessage::fault(call.id, Fault::new(FAULT_FAILED, e.to_string()))
            }
        };
        self.objects.insert(
            path.clone(),
            Served::Pool {
                name: name.to_string(),
            },
        );
        debug!(pool = name, path = %path, "pool created");
        ReplyMessage::success(call.id, path.as_str())
    }

    fn destroy_pool(&mut self, call: &CallMessage) -> ReplyMessage {
        let Some(name) = call.args.first().and_then(Value::as_str) else {
            return invalid_args(call, "DestroyPool expects (name: string)");
        };
        match self.engine.destroy_pool(name) {
            Some(uuid) => {
                let path = format!("/org/sediment/pool/{}", uuid.simple());
                self.objects.retain(|p, _| p.as_str() != path);
                debug!(pool = name, "pool destroyed");
                ReplyMessage::success(call.id, true)
            }
            None => ReplyMessage::success(call.id, false),
        }
    }

    fn rename_pool(&mut self, call: &CallMessage, pool_name: &str) -> ReplyMessage {
        let [value] = call.args.as_slice() else {
            return invalid_args(call, "property set expects exactly one value");
        };
        let Some(new_name) = value.as_str() else {
            return invalid_args(call, "Name expects a string value");
        };
        if let Err(e) = self.engine.rename_pool(pool_name, new_name) {
            return ReplyMessage::fault(call.id, Fault::new(FAULT_FAILED, e.to_string()));
        }
        if let Some(served) = self.objects.get_mut(&call.path) {
            *served = Served::Pool {
                name: new_name.to_string(),
            };
        }
        debug!(pool = pool_name, new_name, "pool renamed");
        ReplyMessage::success(call.id, Value::Null)
    }

    fn managed_objects(&self) -> Map<String, Value> {
        let mut objects = Map::new();
        for (path, served) in &self.objects {
            let entry = match served {
                Served::Manager => json!({
                    (MANAGER_IFACE): { "Version": self.engine.version() },
                    (OBJECT_MANAGER_IFACE): {},
                }),
                Served::Pool { name } => {
                    let uuid = self
                        .engine
                        .pool(name)
                        .map(|info| info.uuid.simple().to_string())
                        .unwrap_or_default();
                    json!({ (POOL_IFACE): { "Name": name, "Uuid": uuid } })
                }
            };
            objects.insert(path.as_str().to_string(), entry);
        }
        objects
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_method(call: &CallMessage, member: &str) -> ReplyMessage {
    ReplyMessage::fault(
        call.id,
        Fault::new(
            FAULT_UNKNOWN_METHOD,
            format!("no method `{member}` on {}", call.interface),
        ),
    )
}

fn unknown_property(call: &CallMessage, member: &str) -> ReplyMessage {
    ReplyMessage::fault(
        call.id,
        Fault::new(
            FAULT_UNKNOWN_PROPERTY,
            format!("no property `{member}` on {}", call.interface),
        ),
    )
}

fn unknown_interface(call: &CallMessage, interface: &str) -> ReplyMessage {
    ReplyMessage::fault(
        call.id,
        Fault::new(
            FAULT_UNKNOWN_INTERFACE,
            format!("object {} does not serve `{interface}`", call.path),
        ),
    )
}

fn invalid_args(call: &CallMessage, message: &str) -> ReplyMessage {
    ReplyMessage::fault(call.id, Fault::new(FAULT_INVALID_ARGS, message))
}

fn access_denied(call: &CallMessage, member: &str) -> ReplyMessage {
    ReplyMessage::fault(
        call.id,
        Fault::new(
            FAULT_ACCESS_DENIED,
            format!("property `{member}` is read-only"),
        ),
    )
}
