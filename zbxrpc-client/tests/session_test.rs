//! Session lifecycle integration tests
//!
//! Tests for login, logout, version queries and client destruction.

mod common;

use common::{FakeZabbix, API_VERSION, PASSWORD, TOKEN, USER};
use serde_json::{json, Value};
use zbxrpc_core::Error;

#[test]
fn test_login_success() {
    let fake = FakeZabbix::new();
    let client = fake.client();

    assert!(client.login(USER, PASSWORD).unwrap());
    assert!(client.is_authenticated());
    assert_eq!(client.auth_token().as_deref(), Some(TOKEN));

    let login = &fake.requests()[0];
    assert_eq!(login["method"], "user.login");
    assert_eq!(login["auth"], Value::Null);
    assert_eq!(login["params"], json!({"user": USER, "password": PASSWORD}));
}

#[test]
fn test_login_wrong_password_clears_token() {
    let fake = FakeZabbix::new();
    let client = fake.logged_in_client();

    assert!(!client.login(USER, "wrong").unwrap());
    assert!(!client.is_authenticated());
    assert_eq!(client.auth_token(), None);
}

#[test]
fn test_login_wrong_password_from_fresh_client() {
    let fake = FakeZabbix::new();
    let client = fake.client();

    assert!(!client.login("guest", PASSWORD).unwrap());
    assert!(!client.is_authenticated());
}

#[test]
fn test_login_transport_failure_is_err() {
    let fake = FakeZabbix::new();
    let client = fake.logged_in_client();
    fake.set_offline(true);

    let result = client.login(USER, PASSWORD);

    assert!(matches!(result, Err(Error::Transport(_))));
    assert!(!client.is_authenticated());
}

#[test]
fn test_calls_carry_session_token() {
    let fake = FakeZabbix::new();
    let client = fake.logged_in_client();

    client.hostgroup_get_by_name("Linux servers").unwrap();

    let requests = fake.requests();
    assert_eq!(requests[1]["auth"], TOKEN);
}

#[test]
fn test_call_without_login_is_remote_error() {
    let fake = FakeZabbix::new();
    let client = fake.client();

    let result = client.hostgroup_get_by_name("Linux servers").unwrap();

    assert!(result.is_fail());
    assert_eq!(result.code, -32602);
    assert_eq!(result.data, json!("Not authorised."));
}

#[test]
fn test_api_version_before_and_after_login() {
    let fake = FakeZabbix::new();
    let client = fake.client();

    assert_eq!(client.api_version().unwrap().data, json!(API_VERSION));

    client.login(USER, PASSWORD).unwrap();
    let result = client.api_version().unwrap();

    assert!(result.is_success());
    assert_eq!(result.data, json!(API_VERSION));
}

#[test]
fn test_logout() {
    let fake = FakeZabbix::new();
    let client = fake.logged_in_client();

    let result = client.logout().unwrap();

    assert!(result.is_success());
    assert!(!client.is_authenticated());
    assert_eq!(fake.methods(), vec!["user.login", "user.logout"]);

    // Second logout has nothing to end
    assert!(client.logout().unwrap().is_success());
    assert_eq!(fake.request_count(), 2);
}

#[test]
fn test_destroy_closes_every_clone() {
    let fake = FakeZabbix::new();
    let client = fake.logged_in_client();
    let clone = client.clone();

    client.destroy();

    assert!(clone.is_closed());
    assert!(!clone.is_authenticated());
    assert!(matches!(clone.hostgroup_create("late"), Err(Error::TransportClosed)));
    assert!(matches!(clone.login(USER, PASSWORD), Err(Error::TransportClosed)));
    assert!(!clone.hostgroup_exists("late"));

    // Idempotent
    clone.destroy();
    assert_eq!(fake.request_count(), 1);
}

#[test]
fn test_raw_call() {
    let fake = FakeZabbix::new();
    let client = fake.logged_in_client();

    let result = client.call("trigger.get", json!({"only_true": true})).unwrap();

    assert_eq!(result.code, -32601);
    assert_eq!(result.message, "Method not found.");
}
