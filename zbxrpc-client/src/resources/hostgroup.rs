//! Host group operations (`hostgroup.*`)

use super::{into_id_list, string_list, ResourceKind};
use crate::ZabbixClient;
use serde_json::{json, Map, Value};
use zbxrpc_core::{ApiResult, EnvelopeBuilder, Result};

const KIND: ResourceKind = ResourceKind::HostGroup;

impl ZabbixClient {
    /// Create one host group
    pub fn hostgroup_create(&self, name: &str) -> Result<ApiResult> {
        let builder = EnvelopeBuilder::new()
            .method(KIND.method("create"))
            .put("name", json!(name))?;
        self.dispatch(builder)
    }

    /// Create several host groups in one call
    pub fn hostgroup_list_create<S: AsRef<str>>(&self, names: &[S]) -> Result<ApiResult> {
        let batch = names
            .iter()
            .map(|name| {
                let mut entry = Map::new();
                entry.insert("name".to_string(), json!(name.as_ref()));
                entry
            })
            .collect();
        self.create_batch(KIND, batch)
    }

    /// Host groups whose name is in `names`
    pub fn hostgroup_list_get_by_name<S: AsRef<str>>(&self, names: &[S]) -> Result<ApiResult> {
        self.get_filtered(KIND, json!({ "name": string_list(names) }))
    }

    pub fn hostgroup_get_by_name(&self, name: &str) -> Result<ApiResult> {
        self.hostgroup_list_get_by_name(&[name])
    }

    /// `groupid` of every group named in `names`
    pub fn hostgroup_id_list_get_by_name<S: AsRef<str>>(&self, names: &[S]) -> Result<ApiResult> {
        Ok(into_id_list(self.hostgroup_list_get_by_name(names)?, KIND))
    }

    /// Host groups containing any of the named hosts
    pub fn hostgroup_get_by_host_name_list<S: AsRef<str>>(&self, hosts: &[S]) -> Result<ApiResult> {
        let host_ids = self.host_id_list_get_by_host_name(hosts)?;
        if host_ids.is_fail() {
            return Ok(host_ids);
        }
        if host_ids.data_array().is_empty() {
            return Ok(ApiResult::success(json!([])));
        }

        let mut params = Map::new();
        params.insert("hostids".to_string(), host_ids.data);
        self.get_with(KIND, params)
    }

    pub fn hostgroup_get_by_host_name(&self, host: &str) -> Result<ApiResult> {
        self.hostgroup_get_by_host_name_list(&[host])
    }

    /// True when a group with this exact name exists
    pub fn hostgroup_exists(&self, name: &str) -> bool {
        self.found(KIND, self.hostgroup_get_by_name(name))
    }

    pub fn hostgroup_list_delete_by_id<S: AsRef<str>>(&self, ids: &[S]) -> Result<ApiResult> {
        self.delete_ids(KIND, ids)
    }

    pub fn hostgroup_delete_by_id(&self, id: &str) -> Result<ApiResult> {
        self.delete_ids(KIND, &[id])
    }

    /// Delete groups by name; no match is a successful no-op
    pub fn hostgroup_list_delete_by_name<S: AsRef<str>>(&self, names: &[S]) -> Result<ApiResult> {
        let resolved = self.hostgroup_list_get_by_name(names)?;
        self.delete_resolved(KIND, resolved)
    }

    pub fn hostgroup_delete_by_name(&self, name: &str) -> Result<ApiResult> {
        self.hostgroup_list_delete_by_name(&[name])
    }
}

/// `groups` value for `host.create`
pub(crate) fn group_refs<S: AsRef<str>>(group_ids: &[S]) -> Value {
    Value::Array(
        group_ids
            .iter()
            .map(|id| json!({ "groupid": id.as_ref() }))
            .collect(),
    )
}
