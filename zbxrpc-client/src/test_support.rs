//! Scripted transport for unit tests

use crate::transport::Transport;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use zbxrpc_core::{Error, Result};

/// Replays canned payloads in order and records request bodies
pub(crate) struct Scripted {
    replies: Mutex<Vec<Result<Value>>>,
    sent: Arc<Mutex<Vec<Value>>>,
}

impl Scripted {
    pub(crate) fn new(mut replies: Vec<Result<Value>>) -> (Self, Arc<Mutex<Vec<Value>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        replies.reverse();
        (
            Self {
                replies: Mutex::new(replies),
                sent: sent.clone(),
            },
            sent,
        )
    }
}

impl Transport for Scripted {
    fn send(&self, body: &str, content_type: &str) -> Result<Value> {
        assert_eq!(content_type, "application/json");
        self.sent.lock().unwrap().push(serde_json::from_str(body).unwrap());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(Error::Transport("no scripted reply".into())))
    }
}

pub(crate) fn ok(result: Value) -> Result<Value> {
    Ok(json!({"jsonrpc": "2.0", "result": result, "id": 1}))
}

pub(crate) fn remote_error(code: i64, message: &str, data: &str) -> Result<Value> {
    Ok(json!({
        "jsonrpc": "2.0",
        "error": {"code": code, "message": message, "data": data},
        "id": 1
    }))
}

/// Client over a scripted transport plus its request log
pub(crate) fn scripted_client(
    replies: Vec<Result<Value>>,
) -> (crate::ZabbixClient, Arc<Mutex<Vec<Value>>>) {
    let (transport, sent) = Scripted::new(replies);
    (crate::ZabbixClient::with_transport(transport), sent)
}
