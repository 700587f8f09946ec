mod lifecycle;
mod message;
mod path;

pub use lifecycle::{remove_socket, socket_path};
pub use message::{
    CallKind, CallMessage, Fault, ReplyMessage, FAULT_ACCESS_DENIED, FAULT_FAILED,
    FAULT_INVALID_ARGS, FAULT_SERVICE_UNKNOWN, FAULT_UNKNOWN_INTERFACE, FAULT_UNKNOWN_METHOD,
    FAULT_UNKNOWN_PROPERTY, SEDIMENTD_BUS_NAME, SEDIMENTD_MANAGER_PATH,
};
pub use path::{ObjectPath, PathError};
