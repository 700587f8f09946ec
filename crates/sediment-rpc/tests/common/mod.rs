//! Shared helpers: a live daemon on a throwaway socket plus a connected
//! client.

use sediment_daemon::Server;
use sediment_rpc::{BusClient, ObjectPath, Proxy, ServiceIdentity, SEDIMENTD_MANAGER_PATH};
use tempfile::TempDir;

pub async fn setup() -> (TempDir, BusClient) {
    let tmp = TempDir::new().unwrap();
    let sock = tmp.path().join("sedimentd.sock");

    let server = Server::bind(&sock).await.unwrap();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = BusClient::connect_to(&sock).await.unwrap();
    (tmp, client)
}

pub fn manager_proxy() -> Proxy {
    let identity = ServiceIdentity::sedimentd();
    identity.resolve(ObjectPath::new(SEDIMENTD_MANAGER_PATH).unwrap())
}
