//! Lists and their entries

use super::{EntityType, PageParams};
use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::Result;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateListParams {
    pub name: String,
    /// Kind of record the list holds
    #[serde(rename = "type")]
    pub list_type: EntityType,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_permissions: Option<Vec<Value>>,
}

impl CreateListParams {
    pub fn new(name: impl Into<String>, list_type: EntityType, is_public: bool) -> Self {
        Self {
            name: name.into(),
            list_type,
            is_public,
            owner_id: None,
            additional_permissions: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddListEntryParams {
    /// Person, organization or opportunity to add
    pub entity_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<i64>,
}

impl AffinityClient {
    /// All lists visible to the key (not paginated)
    pub async fn list_lists(&self) -> Result<Value> {
        self.call("list_lists", Map::new()).await
    }

    pub async fn get_list(&self, list_id: i64) -> Result<Value> {
        self.call("get_list", with_arg(Map::new(), "list_id", list_id))
            .await
    }

    pub async fn create_list(&self, params: &CreateListParams) -> Result<Value> {
        self.call("create_list", to_args(params)?).await
    }

    pub async fn get_list_entry(&self, list_entry_id: i64) -> Result<Value> {
        let args = with_arg(Map::new(), "list_entry_id", list_entry_id);
        self.call("get_list_entry", args).await
    }

    pub async fn list_list_entries(&self, list_id: i64, params: &PageParams) -> Result<Value> {
        let args = with_arg(to_args(params)?, "list_id", list_id);
        self.call("list_list_entries", args).await
    }

    pub fn list_all_list_entries(
        &self,
        list_id: i64,
        params: &PageParams,
    ) -> BoxStream<'static, Result<Value>> {
        let args = to_args(params).map(|args| with_arg(args, "list_id", list_id));
        self.call_all_args("list_list_entries", args)
    }

    pub async fn add_list_entry(&self, list_id: i64, params: &AddListEntryParams) -> Result<Value> {
        let args = with_arg(to_args(params)?, "list_id", list_id);
        self.call("add_list_entry", args).await
    }

    pub async fn delete_list_entry(&self, list_id: i64, list_entry_id: i64) -> Result<Value> {
        let args = with_arg(
            with_arg(Map::new(), "list_id", list_id),
            "list_entry_id",
            list_entry_id,
        );
        self.call("delete_list_entry", args).await
    }
}
