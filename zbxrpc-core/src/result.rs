//! Uniform result of a Zabbix API call
//!
//! Every remote call, successful or not, ends up as an [`ApiResult`]:
//!
//! | outcome                      | `code`        | `message`                  | `data`              |
//! |------------------------------|---------------|----------------------------|---------------------|
//! | remote `result`              | `0`           | "Call Zabbix API Success." | the `result` member |
//! | remote `error`               | remote code   | remote message             | remote `data`       |
//! | local validation failure     | `10001`       | "Param is invalid. ..."    | missing field       |
//!
//! Callers check [`ApiResult::is_fail`] before trusting `data`.

use crate::catalog::ResultCode;
use crate::types::JsonRpcResponse;
use serde::{Deserialize, Serialize};

/// Message attached to every successful result
pub const SUCCESS_MESSAGE: &str = "Call Zabbix API Success.";

/// Normalized outcome of an API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    pub code: i32,
    pub message: String,
    pub data: serde_json::Value,
}

impl ApiResult {
    /// Successful result carrying `data`
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            code: ResultCode::Success.code(),
            message: SUCCESS_MESSAGE.to_string(),
            data,
        }
    }

    /// Failed result with an arbitrary code
    pub fn failure(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// Local validation failure: `field` is missing, `required` lists all
    /// fields the resource kind needs
    pub fn missing_field(field: &str, required: &[&str]) -> Self {
        Self {
            code: ResultCode::ParamIsInvalid.code(),
            message: format!(
                "{} [{}] are required.",
                ResultCode::ParamIsInvalid.message(),
                required.join(", ")
            ),
            data: serde_json::Value::String(format!("Param has no property : {}", field)),
        }
    }

    /// Fold a decoded JSON-RPC response into a result
    ///
    /// An `error` member wins over `result`; a missing remote `data` becomes
    /// `null`.
    pub fn from_response(response: JsonRpcResponse) -> Self {
        match response.error {
            Some(error) => Self {
                code: error.code,
                message: error.message,
                data: error.data.unwrap_or(serde_json::Value::Null),
            },
            None => Self::success(response.result.unwrap_or(serde_json::Value::Null)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success.code()
    }

    pub fn is_fail(&self) -> bool {
        !self.is_success()
    }

    /// Elements of `data` when it is an array, empty otherwise
    pub fn data_array(&self) -> &[serde_json::Value] {
        self.data.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of elements in `data` (arrays and objects), 0 for scalars
    pub fn data_len(&self) -> usize {
        match &self.data {
            serde_json::Value::Array(list) => list.len(),
            serde_json::Value::Object(map) => map.len(),
            _ => 0,
        }
    }
}
