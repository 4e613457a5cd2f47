//! Resource helpers layered on [`ZabbixClient`]
//!
//! Each submodule adds `impl ZabbixClient` blocks for one resource family:
//! host groups, hosts, host interfaces and items. They share the policies
//! implemented here:
//!
//! - **Existence**: a lookup that succeeded and returned at least one entry.
//!   Failed lookups, remote or transport, count as absent.
//! - **Delete by name**: resolve names to ids first. A failed resolution is
//!   returned as is; zero ids short-circuit to success with an empty id list
//!   and nothing is sent.
//! - **Batch creation**: every element is checked against the required
//!   fields of its kind before the first request goes out.

mod host;
mod hostgroup;
mod interface;
mod item;

pub use interface::HostInterface;

use crate::ZabbixClient;
use serde_json::{json, Map, Value};
use zbxrpc_core::{ApiResult, EnvelopeBuilder, Result};

/// Resource families with create/get/delete methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    HostGroup,
    Host,
    HostInterface,
    Item,
}

impl ResourceKind {
    /// API namespace, e.g. `hostgroup` in `hostgroup.get`
    pub fn api_name(&self) -> &'static str {
        match self {
            ResourceKind::HostGroup => "hostgroup",
            ResourceKind::Host => "host",
            ResourceKind::HostInterface => "hostinterface",
            ResourceKind::Item => "item",
        }
    }

    /// Fully qualified method name
    pub fn method(&self, action: &str) -> String {
        format!("{}.{}", self.api_name(), action)
    }

    /// Id property of one entry
    pub fn id_field(&self) -> &'static str {
        match self {
            ResourceKind::HostGroup => "groupid",
            ResourceKind::Host => "hostid",
            ResourceKind::HostInterface => "interfaceid",
            ResourceKind::Item => "itemid",
        }
    }

    /// Key of the id list in create/delete results
    pub fn ids_field(&self) -> &'static str {
        match self {
            ResourceKind::HostGroup => "groupids",
            ResourceKind::Host => "hostids",
            ResourceKind::HostInterface => "interfaceids",
            ResourceKind::Item => "itemids",
        }
    }

    /// Properties `create` needs, in reporting order
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::HostGroup => &["name"],
            ResourceKind::Host => &["host", "groups"],
            ResourceKind::HostInterface => {
                &["dns", "hostid", "ip", "main", "port", "type", "useip"]
            }
            ResourceKind::Item => {
                &["delay", "hostid", "interfaceid", "key_", "name", "type", "value_type"]
            }
        }
    }

    /// First missing required field across `batch`, as a 10001 result
    pub fn validate(&self, batch: &[Map<String, Value>]) -> Option<ApiResult> {
        let required = self.required_fields();
        batch.iter().find_map(|entry| {
            required
                .iter()
                .find(|field| !entry.contains_key(**field))
                .map(|field| ApiResult::missing_field(field, required))
        })
    }

    /// Result of a delete that matched nothing
    pub fn empty_delete_result(&self) -> ApiResult {
        ApiResult::success(json!({ self.ids_field(): [] }))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Id of every entry in a get result, as strings
pub(crate) fn collect_ids(result: &ApiResult, kind: ResourceKind) -> Vec<String> {
    result
        .data_array()
        .iter()
        .filter_map(|entry| match entry.get(kind.id_field()) {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        })
        .collect()
}

/// Replace the data of a successful get result with its id list
pub(crate) fn into_id_list(result: ApiResult, kind: ResourceKind) -> ApiResult {
    if result.is_fail() {
        return result;
    }
    let ids = collect_ids(&result, kind);
    ApiResult::success(json!(ids))
}

/// Owned JSON array of strings
pub(crate) fn string_list<S: AsRef<str>>(values: &[S]) -> Value {
    Value::Array(values.iter().map(|v| Value::from(v.as_ref())).collect())
}

impl ZabbixClient {
    /// `<kind>.get` with `output: extend` and the given filter
    pub(crate) fn get_filtered(&self, kind: ResourceKind, filter: Value) -> Result<ApiResult> {
        let builder = EnvelopeBuilder::new()
            .method(kind.method("get"))
            .put("output", json!("extend"))?
            .put("filter", filter)?;
        self.dispatch(builder)
    }

    /// `<kind>.get` with `output: extend` plus arbitrary keyed params
    pub(crate) fn get_with(
        &self,
        kind: ResourceKind,
        params: Map<String, Value>,
    ) -> Result<ApiResult> {
        let builder = EnvelopeBuilder::new()
            .method(kind.method("get"))
            .put("output", json!("extend"))?
            .params(Value::Object(params))?;
        self.dispatch(builder)
    }

    /// Required-field check with logging and metrics
    pub(crate) fn reject_invalid(
        &self,
        kind: ResourceKind,
        batch: &[Map<String, Value>],
    ) -> Option<ApiResult> {
        let invalid = kind.validate(batch)?;
        if let Some(ref m) = self.metrics {
            m.record_error("validation");
        }
        tracing::warn!(
            kind = %kind,
            message = %invalid.message,
            data = %invalid.data,
            "Rejected create"
        );
        Some(invalid)
    }

    /// Validate, then send `<kind>.create` with an ordered batch
    pub(crate) fn create_batch(
        &self,
        kind: ResourceKind,
        batch: Vec<Map<String, Value>>,
    ) -> Result<ApiResult> {
        if let Some(invalid) = self.reject_invalid(kind, &batch) {
            return Ok(invalid);
        }

        let builder = EnvelopeBuilder::new()
            .method(kind.method("create"))
            .params(Value::Array(batch.into_iter().map(Value::Object).collect()))?;
        self.dispatch(builder)
    }

    /// `<kind>.delete` with an ordered id list
    pub(crate) fn delete_ids<S: AsRef<str>>(
        &self,
        kind: ResourceKind,
        ids: &[S],
    ) -> Result<ApiResult> {
        let builder = EnvelopeBuilder::new()
            .method(kind.method("delete"))
            .params(string_list(ids))?;
        self.dispatch(builder)
    }

    /// Delete whatever a lookup resolved
    pub(crate) fn delete_resolved(
        &self,
        kind: ResourceKind,
        resolved: ApiResult,
    ) -> Result<ApiResult> {
        if resolved.is_fail() {
            return Ok(resolved);
        }
        let ids = collect_ids(&resolved, kind);
        if ids.is_empty() {
            tracing::debug!(kind = %kind, "Nothing to delete");
            return Ok(kind.empty_delete_result());
        }
        self.delete_ids(kind, &ids)
    }

    /// Existence predicate over a lookup outcome
    pub(crate) fn found(&self, kind: ResourceKind, outcome: Result<ApiResult>) -> bool {
        match outcome {
            Ok(result) => result.is_success() && !result.data_array().is_empty(),
            Err(error) => {
                tracing::warn!(kind = %kind, error = %error, "Existence check failed");
                false
            }
        }
    }
}
