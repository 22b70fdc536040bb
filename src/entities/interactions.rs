//! Meetings, calls, chat messages and emails

use super::{int_enum, EntityKind};
use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

int_enum! {
    pub enum InteractionType {
        Meeting = 0,
        Call = 1,
        ChatMessage = 2,
        Email = 3,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListInteractionsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_entry_id: Option<i64>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub interaction_type: Option<InteractionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateInteractionParams {
    pub interaction_type: String,
    pub subject: String,
    pub date: DateTime<Utc>,
    pub creator_id: i64,
    pub participants: Vec<Value>,
    pub entity_id: i64,
    pub entity_type: EntityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateInteractionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AffinityClient {
    pub async fn list_interactions(&self, params: &ListInteractionsParams) -> Result<Value> {
        self.call("list_interactions", to_args(params)?).await
    }

    /// Interactions are keyed by type as well as ID
    pub async fn get_interaction(
        &self,
        interaction_id: i64,
        interaction_type: InteractionType,
    ) -> Result<Value> {
        let args = with_arg(
            with_arg(Map::new(), "interaction_id", interaction_id),
            "type",
            interaction_type.code(),
        );
        self.call("get_interaction", args).await
    }

    pub async fn create_interaction(&self, params: &CreateInteractionParams) -> Result<Value> {
        self.call("create_interaction", to_args(params)?).await
    }

    pub async fn update_interaction(
        &self,
        interaction_id: i64,
        params: &UpdateInteractionParams,
    ) -> Result<Value> {
        let args = with_arg(to_args(params)?, "interaction_id", interaction_id);
        self.call("update_interaction", args).await
    }

    pub async fn delete_interaction(&self, interaction_id: i64) -> Result<Value> {
        let args = with_arg(Map::new(), "interaction_id", interaction_id);
        self.call("delete_interaction", args).await
    }
}
