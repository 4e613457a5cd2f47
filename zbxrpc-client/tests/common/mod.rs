//! Common test utilities for zbxrpc-client integration tests
//!
//! This module provides an in-memory Zabbix API and a loopback HTTP server so
//! the client can be exercised without a real Zabbix installation.

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;
use tokio::sync::oneshot;
use warp::http::{HeaderMap, Method, Response};
use warp::hyper::body::Bytes;
use warp::path::FullPath;
use warp::Filter;
use zbxrpc_client::{Transport, ZabbixClient};
use zbxrpc_core::{Error, Result};

pub const USER: &str = "Admin";
pub const PASSWORD: &str = "zabbix";
pub const TOKEN: &str = "0424bd59b807674191e7d77572075f33";
pub const API_VERSION: &str = "4.0.3";

/// Create a JSON-RPC success payload
pub fn mock_response(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "result": result, "id": id})
}

/// Create a JSON-RPC error payload
pub fn mock_error_response(id: Value, code: i64, message: &str, data: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": {"code": code, "message": message, "data": data},
        "id": id
    })
}

type Fault = (i64, &'static str, String);

fn invalid_params(data: impl Into<String>) -> Fault {
    (-32602, "Invalid params.", data.into())
}

#[derive(Default)]
struct Tables {
    last_id: u64,
    token: Option<String>,
    groups: Vec<Map<String, Value>>,
    hosts: Vec<Map<String, Value>>,
    interfaces: Vec<Map<String, Value>>,
    items: Vec<Map<String, Value>>,
}

impl Tables {
    fn allocate(&mut self) -> String {
        self.last_id += 1;
        (10000 + self.last_id).to_string()
    }

    fn table(&mut self, kind: &str) -> &mut Vec<Map<String, Value>> {
        match kind {
            "hostgroup" => &mut self.groups,
            "host" => &mut self.hosts,
            "hostinterface" => &mut self.interfaces,
            _ => &mut self.items,
        }
    }
}

fn id_field(kind: &str) -> &'static str {
    match kind {
        "hostgroup" => "groupid",
        "host" => "hostid",
        "hostinterface" => "interfaceid",
        _ => "itemid",
    }
}

fn as_entries(params: &Value) -> Vec<Map<String, Value>> {
    match params {
        Value::Object(map) => vec![map.clone()],
        Value::Array(list) => list.iter().filter_map(|v| v.as_object().cloned()).collect(),
        _ => Vec::new(),
    }
}

fn as_strings(value: &Value) -> Vec<String> {
    match value {
        Value::Array(list) => list.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn field_str<'a>(entry: &'a Map<String, Value>, field: &str) -> &'a str {
    entry.get(field).and_then(Value::as_str).unwrap_or_default()
}

/// In-memory Zabbix API
///
/// Serves `apiinfo.version`, `user.login`/`user.logout` and create/get/delete
/// for host groups, hosts, host interfaces and items. Every request body is
/// recorded. Clones share state, so a test can keep one clone while the
/// client owns another.
#[derive(Clone, Default)]
pub struct FakeZabbix {
    tables: Arc<Mutex<Tables>>,
    requests: Arc<Mutex<Vec<Value>>>,
    offline: Arc<AtomicBool>,
}

impl FakeZabbix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client talking to this fake
    pub fn client(&self) -> ZabbixClient {
        ZabbixClient::with_transport(self.clone())
    }

    /// Client already logged in as Admin
    pub fn logged_in_client(&self) -> ZabbixClient {
        let client = self.client();
        assert!(client.login(USER, PASSWORD).unwrap());
        client
    }

    /// Make every subsequent send fail at the transport level
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// All request envelopes received so far
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Method names of all requests, in order
    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["method"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    fn handle(&self, request: &Value) -> std::result::Result<Value, Fault> {
        let method = request["method"].as_str().unwrap_or_default();
        let params = &request["params"];
        let auth = request["auth"].as_str();
        let mut tables = self.tables.lock().unwrap();

        match method {
            "apiinfo.version" => {
                if auth.is_some() {
                    return Err(invalid_params(
                        "The \"apiinfo.version\" method must be called without the \"auth\" parameter.",
                    ));
                }
                return Ok(json!(API_VERSION));
            }
            "user.login" => {
                if params["user"] == USER && params["password"] == PASSWORD {
                    tables.token = Some(TOKEN.to_string());
                    return Ok(json!(TOKEN));
                }
                return Err(invalid_params("Login name or password is incorrect."));
            }
            _ => {}
        }

        if auth.is_none() || auth != tables.token.as_deref() {
            return Err(invalid_params("Not authorised."));
        }

        let Some((kind, action)) = method.split_once('.') else {
            return Err((-32601, "Method not found.", format!("Incorrect method \"{}\".", method)));
        };

        match (kind, action) {
            ("user", "logout") => {
                tables.token = None;
                Ok(json!(true))
            }
            ("hostgroup" | "host" | "hostinterface" | "item", "create") => {
                create(&mut tables, kind, params)
            }
            ("hostgroup" | "host" | "hostinterface" | "item", "get") => {
                Ok(get(&tables, kind, params))
            }
            ("hostgroup" | "host" | "hostinterface" | "item", "delete") => {
                delete(&mut tables, kind, params)
            }
            _ => Err((-32601, "Method not found.", format!("Incorrect API \"{}\".", kind))),
        }
    }
}

fn create(tables: &mut Tables, kind: &str, params: &Value) -> std::result::Result<Value, Fault> {
    let mut ids = Vec::new();
    for mut entry in as_entries(params) {
        if kind == "hostgroup" {
            let name = field_str(&entry, "name").to_string();
            if tables.groups.iter().any(|g| field_str(g, "name") == name) {
                return Err(invalid_params(format!("Host group \"{}\" already exists.", name)));
            }
        }
        if kind == "host" {
            let host = field_str(&entry, "host").to_string();
            if tables.hosts.iter().any(|h| field_str(h, "host") == host) {
                return Err(invalid_params(format!(
                    "Host with the same name \"{}\" already exists.",
                    host
                )));
            }
        }

        let id = tables.allocate();
        entry.insert(id_field(kind).to_string(), json!(id));

        if kind == "host" {
            if let Some(interfaces) = entry.remove("interfaces") {
                for mut interface in as_entries(&interfaces) {
                    let interface_id = tables.allocate();
                    interface.insert("interfaceid".to_string(), json!(interface_id));
                    interface.insert("hostid".to_string(), json!(id));
                    tables.interfaces.push(interface);
                }
            }
        }

        tables.table(kind).push(entry);
        ids.push(id);
    }
    Ok(json!({ format!("{}s", id_field(kind)): ids }))
}

fn get(tables: &Tables, kind: &str, params: &Value) -> Value {
    let entries = match kind {
        "hostgroup" => &tables.groups,
        "host" => &tables.hosts,
        "hostinterface" => &tables.interfaces,
        _ => &tables.items,
    };

    let matches_filter = |entry: &Map<String, Value>| match params["filter"].as_object() {
        Some(filter) => filter
            .iter()
            .all(|(field, wanted)| as_strings(wanted).iter().any(|w| w == field_str(entry, field))),
        None => true,
    };

    let host_ids = params.get("hostids").map(as_strings);
    let group_ids = params.get("groupids").map(as_strings);
    let host_name = params["host"].as_str();

    let selected: Vec<Value> = entries
        .iter()
        .filter(|entry| matches_filter(*entry))
        .filter(|entry| match (&host_ids, kind) {
            (Some(ids), "hostgroup") => tables.hosts.iter().any(|host| {
                ids.iter().any(|id| id == field_str(host, "hostid"))
                    && host_group_ids(host).contains(&field_str(entry, "groupid").to_string())
            }),
            (Some(ids), _) => ids.iter().any(|id| id == field_str(entry, "hostid")),
            (None, _) => true,
        })
        .filter(|entry| match &group_ids {
            Some(ids) => host_group_ids(entry).iter().any(|g| ids.contains(g)),
            None => true,
        })
        .filter(|entry| match host_name {
            Some(name) => tables
                .hosts
                .iter()
                .any(|host| {
                    field_str(host, "host") == name
                        && field_str(host, "hostid") == field_str(entry, "hostid")
                }),
            None => true,
        })
        .map(|entry| Value::Object(entry.clone()))
        .collect();

    Value::Array(selected)
}

fn host_group_ids(host: &Map<String, Value>) -> Vec<String> {
    host.get("groups")
        .and_then(Value::as_array)
        .map(|groups| {
            groups
                .iter()
                .filter_map(|g| g["groupid"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn delete(tables: &mut Tables, kind: &str, params: &Value) -> std::result::Result<Value, Fault> {
    let ids = as_strings(params);
    let field = id_field(kind);
    let table = tables.table(kind);

    if ids.is_empty() || !ids.iter().all(|id| table.iter().any(|e| field_str(e, field) == id)) {
        return Err(invalid_params("No permissions to referred object or it does not exist!"));
    }
    table.retain(|entry| !ids.iter().any(|id| id == field_str(entry, field)));

    if kind == "host" {
        tables
            .interfaces
            .retain(|entry| !ids.iter().any(|id| id == field_str(entry, "hostid")));
    }
    Ok(json!({ format!("{}s", field): ids }))
}

impl Transport for FakeZabbix {
    fn send(&self, body: &str, content_type: &str) -> Result<Value> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Transport("Connection refused (os error 111)".to_string()));
        }
        assert_eq!(content_type, "application/json");

        let request: Value = serde_json::from_str(body)?;
        self.requests.lock().unwrap().push(request.clone());

        let id = request["id"].clone();
        Ok(match self.handle(&request) {
            Ok(result) => mock_response(id, result),
            Err((code, message, data)) => mock_error_response(id, code, message, &data),
        })
    }
}

/// Request captured by [`LoopbackServer`]
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Canned reply: status, content type, body
pub type Canned = (u16, &'static str, String);

/// Loopback HTTP server answering canned replies in order
///
/// Runs a warp filter on a current-thread tokio runtime in its own thread, so
/// the blocking client under test can call it from the test thread.
pub struct LoopbackServer {
    url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl LoopbackServer {
    /// Serve `replies` in order; once they run out every request gets a 500
    pub fn start(replies: Vec<Canned>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(Mutex::new(VecDeque::from(replies)));

        let captured = requests.clone();
        let route = warp::any()
            .and(warp::method())
            .and(warp::path::full())
            .and(warp::header::headers_cloned())
            .and(warp::body::bytes())
            .map(move |method: Method, path: FullPath, headers: HeaderMap, body: Bytes| {
                captured.lock().unwrap().push(CapturedRequest {
                    method,
                    path: path.as_str().to_string(),
                    headers,
                    body: String::from_utf8_lossy(&body).into_owned(),
                });

                let (status, content_type, body) = queue
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or((500, "text/plain", "no canned reply left".to_string()));
                Response::builder()
                    .status(status)
                    .header("content-type", content_type)
                    .body(body)
            });

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (addr_tx, addr_rx) = mpsc::channel();
        let handle = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let (addr, server) =
                    warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
                        shutdown_rx.await.ok();
                    });
                addr_tx.send(addr).unwrap();
                server.await;
            });
        });
        let addr: SocketAddr = addr_rx.recv().unwrap();

        Self {
            url: format!("http://{}/zabbix/api_jsonrpc.php", addr),
            requests,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Serve JSON bodies with status 200
    pub fn json(bodies: Vec<Value>) -> Self {
        Self::start(
            bodies
                .into_iter()
                .map(|body| (200, "application/json", body.to_string()))
                .collect(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Stop the server and return everything it received
    pub fn join(mut self) -> Vec<CapturedRequest> {
        self.stop();
        self.requests()
    }

    fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
    }
}

impl Drop for LoopbackServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
