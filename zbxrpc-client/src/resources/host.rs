//! Host operations (`host.*`)

use super::hostgroup::group_refs;
use super::{into_id_list, string_list, HostInterface, ResourceKind};
use crate::ZabbixClient;
use serde_json::{json, Map, Value};
use zbxrpc_core::{ApiResult, EnvelopeBuilder, Result};

const KIND: ResourceKind = ResourceKind::Host;

impl ZabbixClient {
    /// Create a host in the given groups
    ///
    /// `interfaces` is omitted from the request when empty.
    pub fn host_create<S: AsRef<str>>(
        &self,
        host: &str,
        group_ids: &[S],
        interfaces: &[HostInterface],
    ) -> Result<ApiResult> {
        let mut builder = EnvelopeBuilder::new()
            .method(KIND.method("create"))
            .put("host", json!(host))?
            .put("groups", group_refs(group_ids))?;
        if !interfaces.is_empty() {
            builder = builder.put("interfaces", serde_json::to_value(interfaces)?)?;
        }
        self.dispatch(builder)
    }

    /// Create several hosts; every entry needs `host` and `groups`
    pub fn host_list_create(&self, hosts: Vec<Map<String, Value>>) -> Result<ApiResult> {
        self.create_batch(KIND, hosts)
    }

    /// Hosts whose technical name is in `hosts`
    pub fn host_list_get_by_host_name<S: AsRef<str>>(&self, hosts: &[S]) -> Result<ApiResult> {
        self.get_filtered(KIND, json!({ "host": string_list(hosts) }))
    }

    pub fn host_get_by_host_name(&self, host: &str) -> Result<ApiResult> {
        self.host_list_get_by_host_name(&[host])
    }

    /// `hostid` of every named host
    pub fn host_id_list_get_by_host_name<S: AsRef<str>>(&self, hosts: &[S]) -> Result<ApiResult> {
        Ok(into_id_list(self.host_list_get_by_host_name(hosts)?, KIND))
    }

    /// Hosts belonging to any of the named groups
    ///
    /// # Warning
    ///
    /// When none of the named groups exists, `groupids` is left out and the
    /// call returns **every host** the session can see. This differs from
    /// [`hostgroup_get_by_host_name_list`](Self::hostgroup_get_by_host_name_list),
    /// which returns `[]` for unknown hosts. Check the groups with
    /// [`hostgroup_exists`](Self::hostgroup_exists) first when that matters.
    pub fn host_get_by_group_name<S: AsRef<str>>(&self, groups: &[S]) -> Result<ApiResult> {
        let group_ids = self.hostgroup_id_list_get_by_name(groups)?;
        if group_ids.is_fail() {
            return Ok(group_ids);
        }

        let mut params = Map::new();
        if !group_ids.data_array().is_empty() {
            params.insert("groupids".to_string(), group_ids.data);
        }
        self.get_with(KIND, params)
    }

    /// Named hosts restricted to the named groups
    ///
    /// # Warning
    ///
    /// When none of the named groups exists, the group restriction is dropped
    /// and the named hosts are returned whatever their groups.
    pub fn host_get_by_host_name_and_group_name<S: AsRef<str>, G: AsRef<str>>(
        &self,
        hosts: &[S],
        groups: &[G],
    ) -> Result<ApiResult> {
        let group_ids = self.hostgroup_id_list_get_by_name(groups)?;
        if group_ids.is_fail() {
            return Ok(group_ids);
        }

        let mut params = Map::new();
        params.insert("filter".to_string(), json!({ "host": string_list(hosts) }));
        if !group_ids.data_array().is_empty() {
            params.insert("groupids".to_string(), group_ids.data);
        }
        self.get_with(KIND, params)
    }

    /// True when a host with this technical name exists
    pub fn host_exists(&self, host: &str) -> bool {
        self.found(KIND, self.host_get_by_host_name(host))
    }

    pub fn host_list_delete_by_id<S: AsRef<str>>(&self, ids: &[S]) -> Result<ApiResult> {
        self.delete_ids(KIND, ids)
    }

    pub fn host_delete_by_id(&self, id: &str) -> Result<ApiResult> {
        self.delete_ids(KIND, &[id])
    }

    /// Delete hosts by technical name; no match is a successful no-op
    pub fn host_list_delete_by_name<S: AsRef<str>>(&self, hosts: &[S]) -> Result<ApiResult> {
        let resolved = self.host_list_get_by_host_name(hosts)?;
        self.delete_resolved(KIND, resolved)
    }

    pub fn host_delete_by_name(&self, host: &str) -> Result<ApiResult> {
        self.host_list_delete_by_name(&[host])
    }
}
