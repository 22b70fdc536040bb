//! Field definitions

use super::{int_enum, EntityType};
use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

int_enum! {
    /// Data type held by a field
    pub enum FieldValueType {
        Person = 0,
        Organization = 1,
        Dropdown = 2,
        Number = 3,
        Date = 4,
        Location = 5,
        Text = 6,
        RankedDropdown = 7,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListFieldsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<FieldValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_modified_names: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_dropdown_options: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateFieldParams {
    pub name: String,
    pub entity_type: EntityType,
    pub value_type: FieldValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_multiple: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_list_specific: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}

impl CreateFieldParams {
    pub fn new(name: impl Into<String>, entity_type: EntityType, value_type: FieldValueType) -> Self {
        Self {
            name: name.into(),
            entity_type,
            value_type,
            list_id: None,
            allows_multiple: None,
            is_list_specific: None,
            is_required: None,
        }
    }
}

impl AffinityClient {
    pub async fn list_fields(&self, params: &ListFieldsParams) -> Result<Value> {
        self.call("list_fields", to_args(params)?).await
    }

    pub async fn get_field(&self, field_id: i64) -> Result<Value> {
        self.call("get_field", with_arg(Map::new(), "field_id", field_id))
            .await
    }

    pub async fn create_field(&self, params: &CreateFieldParams) -> Result<Value> {
        self.call("create_field", to_args(params)?).await
    }

    pub async fn delete_field(&self, field_id: i64) -> Result<Value> {
        self.call("delete_field", with_arg(Map::new(), "field_id", field_id))
            .await
    }
}
