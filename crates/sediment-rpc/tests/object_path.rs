//! Invocation behavior for paths that name no live object.
//!
//! A proxy always resolves, whatever its path; the daemon answers calls
//! to a dead path with the unknown-method fault, and the classification
//! is stable across repetition and invocation shape.

mod common;

use common::{manager_proxy, setup};
use sediment_rpc::interfaces::{Manager, ObjectManager, POOL};
use sediment_rpc::{
    InvokeError, ObjectPath, PathError, Proxy, ServiceIdentity, FAULT_UNKNOWN_METHOD,
};
use serde_json::Value;

fn nonexistent_proxy() -> Proxy {
    let identity = ServiceIdentity::sedimentd();
    let path = ObjectPath::new("/this/is/not/an/object/path").unwrap();
    identity.resolve(path)
}

#[tokio::test]
async fn method_call_on_nonexistent_path_reports_unknown_method() {
    let (_tmp, client) = setup().await;
    let proxy = nonexistent_proxy();

    let err = ObjectManager::get_managed_objects(&client, &proxy)
        .await
        .unwrap_err();
    assert!(matches!(err, InvokeError::Rejected(_)));
    assert_eq!(err.fault_name(), Some(FAULT_UNKNOWN_METHOD));
}

#[tokio::test]
async fn property_get_on_nonexistent_path_reports_unknown_method() {
    let (_tmp, client) = setup().await;
    let proxy = nonexistent_proxy();

    let err = Manager::version(&client, &proxy).await.unwrap_err();
    assert!(matches!(err, InvokeError::Rejected(_)));
    assert_eq!(err.fault_name(), Some(FAULT_UNKNOWN_METHOD));
}

#[tokio::test]
async fn property_set_on_nonexistent_path_reports_unknown_method() {
    let (_tmp, client) = setup().await;
    let proxy = nonexistent_proxy();

    let err = client
        .set_property(&proxy, &POOL, "Name", Value::from("renamed"))
        .await
        .unwrap_err();
    assert_eq!(err.fault_name(), Some(FAULT_UNKNOWN_METHOD));
}

#[tokio::test]
async fn identical_invocations_classify_identically() {
    let (_tmp, client) = setup().await;
    let proxy = nonexistent_proxy();

    for _ in 0..3 {
        let err = ObjectManager::get_managed_objects(&client, &proxy)
            .await
            .unwrap_err();
        assert_eq!(err.fault_name(), Some(FAULT_UNKNOWN_METHOD));
    }
}

#[tokio::test]
async fn daemon_stays_up_across_rejections() {
    let (_tmp, client) = setup().await;
    let proxy = nonexistent_proxy();

    let _ = ObjectManager::get_managed_objects(&client, &proxy).await;
    let version = Manager::version(&client, &manager_proxy()).await.unwrap();
    assert!(!version.is_empty());
}

#[tokio::test]
async fn resolving_twice_yields_interchangeable_proxies() {
    let (_tmp, client) = setup().await;
    let identity = ServiceIdentity::sedimentd();
    let path = manager_proxy().path().clone();

    let a = identity.resolve(path.clone());
    let b = identity.resolve(path);
    let va = Manager::version(&client, &a).await.unwrap();
    let vb = Manager::version(&client, &b).await.unwrap();
    assert_eq!(va, vb);
}

#[test]
fn invalid_paths_never_reach_the_bus() {
    assert!(matches!(
        ObjectPath::new("abc"),
        Err(PathError::MissingLeadingSlash(_))
    ));
    assert!(matches!(ObjectPath::new(""), Err(PathError::Empty)));
    assert!(matches!(
        ObjectPath::new("/a//b"),
        Err(PathError::EmptySegment(_))
    ));
    assert!(matches!(
        ObjectPath::new("/a/"),
        Err(PathError::TrailingSlash(_))
    ));
    assert!(matches!(
        ObjectPath::new("/a-b"),
        Err(PathError::IllegalCharacter(_, '-'))
    ));
}
