//! sedimentd, the simulator daemon for the sediment object bus
//!
//! Serves the manager object (`org.sediment.Manager1` +
//! `org.sediment.ObjectManager1`) and one object per simulated pool over
//! a Unix socket. Storage is simulated in memory; the bus surface is the
//! real one, so clients exercise the same routing and fault behavior a
//! production endpoint would show.

mod engine;
mod registry;
mod server;

pub use engine::{EngineError, PoolInfo, SimEngine};
pub use registry::ObjectRegistry;
pub use server::Server;

pub use sediment_protocol::{remove_socket, socket_path};
