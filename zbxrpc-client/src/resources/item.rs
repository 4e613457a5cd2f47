//! Item operations (`item.*`)

use super::{into_id_list, string_list, ResourceKind};
use crate::ZabbixClient;
use serde_json::{json, Map, Value};
use zbxrpc_core::{ApiResult, Result};

const KIND: ResourceKind = ResourceKind::Item;

impl ZabbixClient {
    /// Create one item
    pub fn item_create(&self, item: Map<String, Value>) -> Result<ApiResult> {
        self.item_list_create(vec![item])
    }

    /// Create several items
    ///
    /// Every entry needs `delay`, `hostid`, `interfaceid`, `key_`, `name`,
    /// `type` and `value_type`.
    pub fn item_list_create(&self, items: Vec<Map<String, Value>>) -> Result<ApiResult> {
        self.create_batch(KIND, items)
    }

    /// `item.get` with caller params and a `filter` object
    pub fn item_get(
        &self,
        mut params: Map<String, Value>,
        filter: Map<String, Value>,
    ) -> Result<ApiResult> {
        params.insert("filter".to_string(), Value::Object(filter));
        self.get_with(KIND, params)
    }

    /// Items of `host` whose key is in `keys`
    pub fn item_get_by_host_name_and_item_key<S: AsRef<str>>(
        &self,
        host: &str,
        keys: &[S],
    ) -> Result<ApiResult> {
        self.item_get_by_host_and(host, "key_", keys)
    }

    /// Items of `host` whose name is in `names`
    pub fn item_get_by_host_name_and_item_name<S: AsRef<str>>(
        &self,
        host: &str,
        names: &[S],
    ) -> Result<ApiResult> {
        self.item_get_by_host_and(host, "name", names)
    }

    fn item_get_by_host_and<S: AsRef<str>>(
        &self,
        host: &str,
        field: &str,
        values: &[S],
    ) -> Result<ApiResult> {
        let mut params = Map::new();
        params.insert("host".to_string(), json!(host));
        let mut filter = Map::new();
        filter.insert(field.to_string(), string_list(values));
        self.item_get(params, filter)
    }

    pub fn item_id_list_get_by_item_key<S: AsRef<str>>(
        &self,
        host: &str,
        keys: &[S],
    ) -> Result<ApiResult> {
        Ok(into_id_list(self.item_get_by_host_name_and_item_key(host, keys)?, KIND))
    }

    pub fn item_id_list_get_by_item_name<S: AsRef<str>>(
        &self,
        host: &str,
        names: &[S],
    ) -> Result<ApiResult> {
        Ok(into_id_list(self.item_get_by_host_name_and_item_name(host, names)?, KIND))
    }

    /// True when `host` has an item with this key
    pub fn item_exists_by_item_key(&self, host: &str, key: &str) -> bool {
        first_has_item_id(self.item_get_by_host_name_and_item_key(host, &[key]))
    }

    /// True when `host` has an item with this name
    pub fn item_exists_by_item_name(&self, host: &str, name: &str) -> bool {
        first_has_item_id(self.item_get_by_host_name_and_item_name(host, &[name]))
    }

    pub fn item_list_delete_by_item_id<S: AsRef<str>>(&self, ids: &[S]) -> Result<ApiResult> {
        self.delete_ids(KIND, ids)
    }

    pub fn item_delete_by_item_id(&self, id: &str) -> Result<ApiResult> {
        self.delete_ids(KIND, &[id])
    }

    /// Delete items of `host` by key; no match is a no-op
    pub fn item_list_delete_by_item_key<S: AsRef<str>>(
        &self,
        host: &str,
        keys: &[S],
    ) -> Result<ApiResult> {
        let resolved = self.item_get_by_host_name_and_item_key(host, keys)?;
        self.delete_resolved(KIND, resolved)
    }

    /// Delete items of `host` by name; no match is a no-op
    pub fn item_list_delete_by_item_name<S: AsRef<str>>(
        &self,
        host: &str,
        names: &[S],
    ) -> Result<ApiResult> {
        let resolved = self.item_get_by_host_name_and_item_name(host, names)?;
        self.delete_resolved(KIND, resolved)
    }
}

fn first_has_item_id(outcome: Result<ApiResult>) -> bool {
    match outcome {
        Ok(result) if result.is_success() => result
            .data_array()
            .first()
            .and_then(|item| item.get(KIND.id_field()))
            .map(|id| match id {
                Value::String(id) => !id.is_empty(),
                Value::Number(_) => true,
                _ => false,
            })
            .unwrap_or(false),
        Ok(_) => false,
        Err(error) => {
            tracing::warn!(kind = %KIND, error = %error, "Existence check failed");
            false
        }
    }
}
