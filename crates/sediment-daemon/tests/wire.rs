//! Wire-format tests against a live server, without the client library.
//!
//! These pin the on-the-wire contract: line-delimited JSON, fault names,
//! and the reply shape for calls the server cannot even parse.

use sediment_daemon::Server;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

async fn start_server() -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let sock = tmp.path().join("sedimentd.sock");
    let server = Server::bind(&sock).await.unwrap();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (tmp, sock)
}

async fn send_line(stream: &mut BufReader<UnixStream>, line: &str) -> Value {
    let mut framed = line.to_string();
    framed.push('\n');
    stream.get_mut().write_all(framed.as_bytes()).await.unwrap();
    let mut reply = String::new();
    stream.read_line(&mut reply).await.unwrap();
    serde_json::from_str(&reply).unwrap()
}

async fn roundtrip(stream: &mut BufReader<UnixStream>, call: Value) -> Value {
    send_line(stream, &serde_json::to_string(&call).unwrap()).await
}

#[tokio::test]
async fn property_get_round_trip() {
    let (_tmp, sock) = start_server().await;
    let mut stream = BufReader::new(UnixStream::connect(&sock).await.unwrap());

    let reply = roundtrip(
        &mut stream,
        json!({
            "id": 1,
            "destination": "org.sediment.Sediment1",
            "path": "/org/sediment/Manager",
            "interface": "org.sediment.Manager1",
            "member": "Version",
            "kind": "property_get",
        }),
    )
    .await;

    assert_eq!(reply["id"], json!(1));
    assert!(reply["result"].is_string());
    assert!(reply.get("fault").is_none());
}

#[tokio::test]
async fn unknown_path_answers_with_the_unknown_method_fault() {
    let (_tmp, sock) = start_server().await;
    let mut stream = BufReader::new(UnixStream::connect(&sock).await.unwrap());

    let reply = roundtrip(
        &mut stream,
        json!({
            "id": 2,
            "destination": "org.sediment.Sediment1",
            "path": "/this/is/not/an/object/path",
            "interface": "org.sediment.ObjectManager1",
            "member": "GetManagedObjects",
            "kind": "method_call",
        }),
    )
    .await;

    assert_eq!(reply["id"], json!(2));
    assert_eq!(reply["fault"]["name"], json!("org.sediment.Error.UnknownMethod"));
    assert!(reply.get("result").is_none());
}

#[tokio::test]
async fn wrong_destination_answers_service_unknown() {
    let (_tmp, sock) = start_server().await;
    let mut stream = BufReader::new(UnixStream::connect(&sock).await.unwrap());

    let reply = roundtrip(
        &mut stream,
        json!({
            "id": 3,
            "destination": "org.example.Nobody",
            "path": "/org/sediment/Manager",
            "interface": "org.sediment.Manager1",
            "member": "Version",
            "kind": "property_get",
        }),
    )
    .await;

    assert_eq!(reply["fault"]["name"], json!("org.sediment.Error.ServiceUnknown"));
}

#[tokio::test]
async fn unparseable_line_answers_invalid_args_without_id() {
    let (_tmp, sock) = start_server().await;
    let mut stream = BufReader::new(UnixStream::connect(&sock).await.unwrap());

    let reply = send_line(&mut stream, "this is not json").await;

    assert!(reply.get("id").is_none());
    assert_eq!(reply["fault"]["name"], json!("org.sediment.Error.InvalidArgs"));
}

#[tokio::test]
async fn malformed_object_path_is_rejected_at_the_wire() {
    let (_tmp, sock) = start_server().await;
    let mut stream = BufReader::new(UnixStream::connect(&sock).await.unwrap());

    // The path fails validation during deserialization, so the call never
    // reaches dispatch.
    let reply = roundtrip(
        &mut stream,
        json!({
            "id": 4,
            "destination": "org.sediment.Sediment1",
            "path": "not/a/path",
            "interface": "org.sediment.Manager1",
            "member": "Version",
            "kind": "property_get",
        }),
    )
    .await;

    assert!(reply.get("id").is_none());
    assert_eq!(reply["fault"]["name"], json!("org.sediment.Error.InvalidArgs"));
}

#[tokio::test]
async fn server_survives_a_burst_of_calls_to_dead_paths() {
    let (_tmp, sock) = start_server().await;
    let mut stream = BufReader::new(UnixStream::connect(&sock).await.unwrap());

    for id in 0..10u64 {
        let reply = roundtrip(
            &mut stream,
            json!({
                "id": id,
                "destination": "org.sediment.Sediment1",
                "path": "/nobody/home",
                "interface": "org.sediment.Pool1",
                "member": "Name",
                "kind": "property_get",
            }),
        )
        .await;
        assert_eq!(reply["id"], json!(id));
        assert_eq!(reply["fault"]["name"], json!("org.sediment.Error.UnknownMethod"));
    }

    // Still able to serve a real object afterwards.
    let reply = roundtrip(
        &mut stream,
        json!({
            "id": 99,
            "destination": "org.sediment.Sediment1",
            "path": "/org/sediment/Manager",
            "interface": "org.sediment.Manager1",
            "member": "Version",
            "kind": "property_get",
        }),
    )
    .await;
    assert!(reply["result"].is_string());
}
