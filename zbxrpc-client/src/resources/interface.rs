//! Host interface operations (`hostinterface.*`)

use super::{collect_ids, into_id_list, string_list, ResourceKind};
use crate::ZabbixClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use zbxrpc_core::{ApiResult, EnvelopeBuilder, InterfaceType, Result};

const KIND: ResourceKind = ResourceKind::HostInterface;

/// Host interface definition
///
/// The API exchanges every property as a string, flags included ("0"/"1").
/// `hostid` is left out for interfaces embedded in `host.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInterface {
    pub dns: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostid: Option<String>,
    pub ip: String,
    /// "1" for the default interface of its type
    pub main: String,
    pub port: String,
    #[serde(rename = "type")]
    pub interface_type: String,
    /// "1" to connect by IP, "0" by DNS name
    pub useip: String,
}

impl HostInterface {
    /// Default interface of `interface_type`, reached by IP
    pub fn new(
        interface_type: InterfaceType,
        ip: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            dns: String::new(),
            hostid: None,
            ip: ip.into(),
            main: "1".to_string(),
            port: port.into(),
            interface_type: interface_type.code().to_string(),
            useip: "1".to_string(),
        }
    }

    pub fn with_host_id(mut self, host_id: impl Into<String>) -> Self {
        self.hostid = Some(host_id.into());
        self
    }

    /// Connect by DNS name instead of IP
    pub fn with_dns(mut self, dns: impl Into<String>) -> Self {
        self.dns = dns.into();
        self.useip = "0".to_string();
        self
    }

    /// Mark as a secondary interface
    pub fn secondary(mut self) -> Self {
        self.main = "0".to_string();
        self
    }

    fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl ZabbixClient {
    /// Create one interface; `hostid` must be set
    pub fn host_interface_create(&self, interface: &HostInterface) -> Result<ApiResult> {
        let entry = interface.to_map()?;
        if let Some(invalid) = self.reject_invalid(KIND, std::slice::from_ref(&entry)) {
            return Ok(invalid);
        }

        let builder = EnvelopeBuilder::new()
            .method(KIND.method("create"))
            .params(Value::Object(entry))?;
        self.dispatch(builder)
    }

    /// Create several interfaces; every entry needs all seven properties
    pub fn host_interface_list_create(
        &self,
        interfaces: Vec<Map<String, Value>>,
    ) -> Result<ApiResult> {
        self.create_batch(KIND, interfaces)
    }

    /// Interfaces of the given hosts
    pub fn host_interface_get_by_host_ids<S: AsRef<str>>(
        &self,
        host_ids: &[S],
    ) -> Result<ApiResult> {
        let mut params = Map::new();
        params.insert("hostids".to_string(), string_list(host_ids));
        self.get_with(KIND, params)
    }

    /// Interfaces of the named hosts
    pub fn host_interface_get_by_host_names<S: AsRef<str>>(
        &self,
        hosts: &[S],
    ) -> Result<ApiResult> {
        let hosts = self.host_list_get_by_host_name(hosts)?;
        if hosts.is_fail() {
            return Ok(hosts);
        }
        let host_ids = collect_ids(&hosts, ResourceKind::Host);
        if host_ids.is_empty() {
            return Ok(ApiResult::success(json!([])));
        }
        self.host_interface_get_by_host_ids(&host_ids)
    }

    /// `interfaceid` of every interface of the named hosts
    pub fn host_interface_id_list_get_by_host_names<S: AsRef<str>>(
        &self,
        hosts: &[S],
    ) -> Result<ApiResult> {
        Ok(into_id_list(self.host_interface_get_by_host_names(hosts)?, KIND))
    }

    /// True when the host has at least one interface
    pub fn host_interface_exists(&self, host: &str) -> bool {
        self.found(KIND, self.host_interface_get_by_host_names(&[host]))
    }

    pub fn host_interface_list_delete_by_id<S: AsRef<str>>(&self, ids: &[S]) -> Result<ApiResult> {
        self.delete_ids(KIND, ids)
    }

    pub fn host_interface_delete_by_id(&self, id: &str) -> Result<ApiResult> {
        self.delete_ids(KIND, &[id])
    }

    /// Delete every interface of the named hosts; no match is a no-op
    pub fn host_interface_list_delete_by_host_name<S: AsRef<str>>(
        &self,
        hosts: &[S],
    ) -> Result<ApiResult> {
        let resolved = self.host_interface_get_by_host_names(hosts)?;
        self.delete_resolved(KIND, resolved)
    }
}
