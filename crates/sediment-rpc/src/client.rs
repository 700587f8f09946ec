//! Bus client implementation

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use sediment_protocol::{socket_path, CallKind, CallMessage, ReplyMessage};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::Mutex;
use tracing::debug;

use crate::descriptor::{InterfaceDescriptor, ValueKind};
use crate::error::{DecodeError, InvokeError};
use crate::proxy::Proxy;

/// Connection to the sedimentd object bus.
///
/// One client is one socket. The reader lock is held across the whole
/// round trip, so concurrent callers serialize into complete
/// request–reply exchanges; beyond the connection there is no shared
/// state, no cache, and no retry.
#[derive(Debug)]
pub struct BusClient {
    reader: Mutex<BufReader<tokio::net::unix::OwnedReadHalf>>,
    writer: Mutex<tokio::net::unix::OwnedWriteHalf>,
    next_id: AtomicU64,
}

impl BusClient {
    /// Connect to the bus at the default socket path.
    pub async fn connect() -> std::io::Result<Self> {
        Self::connect_to(&socket_path()).await
    }

    /// Connect to the bus at a specific socket path.
    ///
    /// Failure here means the daemon endpoint is unreachable; the error
    /// is handed back untouched.
    pub async fn connect_to(path: &Path) -> std::io::Result<Self> {
        let stream = UnixStream::connect(path).await?;
        let (read, write) = stream.into_split();

        Ok(Self {
            reader: Mutex::new(BufReader::new(read)),
            writer: Mutex::new(write),
            next_id: AtomicU64::new(1),
        })
    }

    /// Perform one invocation round trip through `proxy`.
    ///
    /// The single funnel for all invocation shapes; the typed entry
    /// points below delegate here. The round trip completes even when
    /// nothing lives at the proxy's path: the endpoint answers such
    /// calls with an unknown-method fault, which comes back as
    /// [`InvokeError::Rejected`] like any other remote rejection.
    pub async fn invoke(
        &self,
        proxy: &Proxy,
        interface: &str,
        member: &str,
        kind: CallKind,
        args: Vec<Value>,
    ) -> Result<Value, InvokeError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let call = CallMessage {
            id,
            destination: proxy.identity().bus_name().to_string(),
            path: proxy.path().clone(),
            interface: interface.to_string(),
            member: member.to_string(),
            kind,
            args,
        };

        let mut line = serde_json::to_string(&call).map_err(DecodeError::Json)?;
        line.push('\n');

        debug!(path = %call.path, interface, member, ?kind, "invoking");

        let mut reader = self.reader.lock().await;
        {
            let mut writer = self.writer.lock().await;
            writer.write_all(line.as_bytes()).await?;
        }

        let mut reply_line = String::new();
        let n = reader.read_line(&mut reply_line).await?;
        if n == 0 {
            return Err(InvokeError::Transport(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed by daemon",
            )));
        }
        drop(reader);

        let reply: ReplyMessage = serde_json::from_str(&reply_line).map_err(DecodeError::Json)?;
        if reply.id != Some(id) {
            return Err(DecodeError::IdMismatch {
                sent: id,
                got: reply.id,
            }
            .into());
        }
        if let Some(fault) = reply.fault {
            return Err(InvokeError::Rejected(fault));
        }
        Ok(reply.result.unwrap_or(Value::Null))
    }

    /// Invoke a declared method and check the reply against its
    /// declared return signature.
    pub async fn call_method(
        &self,
        proxy: &Proxy,
        interface: &InterfaceDescriptor,
        member: &str,
        args: Vec<Value>,
    ) -> Result<Value, InvokeError> {
        let method = interface
            .method(member)
            .ok_or_else(|| unknown_member(interface, member))?;
        let value = self
            .invoke(proxy, interface.name, member, CallKind::MethodCall, args)
            .await?;
        check_signature(member, method.returns, value)
    }

    /// Read a declared property.
    pub async fn get_property(
        &self,
        proxy: &Proxy,
        interface: &InterfaceDescriptor,
        name: &str,
    ) -> Result<Value, InvokeError> {
        let property = interface
            .property(name)
            .ok_or_else(|| unknown_member(interface, name))?;
        let value = self
            .invoke(proxy, interface.name, name, CallKind::PropertyGet, Vec::new())
            .await?;
        check_signature(name, property.kind, value)
    }

    /// Write a declared property.
    ///
    /// Whether the property accepts writes is the remote side's call;
    /// a read-only property answers with an access-denied fault.
    pub async fn set_property(
        &self,
        proxy: &Proxy,
        interface: &InterfaceDescriptor,
        name: &str,
        value: Value,
    ) -> Result<(), InvokeError> {
        interface
            .property(name)
            .ok_or_else(|| unknown_member(interface, name))?;
        let reply = self
            .invoke(
                proxy,
                interface.name,
                name,
                CallKind::PropertySet,
                vec![value],
            )
            .await?;
        check_signature(name, ValueKind::Null, reply)?;
        Ok(())
    }
}

fn unknown_member(interface: &InterfaceDescriptor, member: &str) -> DecodeError {
    DecodeError::UnknownMember {
        interface: interface.name.to_string(),
        member: member.to_string(),
    }
}

fn check_signature(member: &str, expected: ValueKind, value: Value) -> Result<Value, InvokeError> {
    if expected.matches(&value) {
        Ok(value)
    } else {
        Err(DecodeError::Signature {
            member: member.to_string(),
            expected,
        }
        .into())
    }
}
