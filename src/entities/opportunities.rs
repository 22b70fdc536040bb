//! Opportunities: lookup, search and CRUD

use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::Result;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetOpportunityParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_interactions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_notes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_reminders: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_files: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListOpportunitiesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// A new opportunity always lives on a list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateOpportunityParams {
    pub name: String,
    pub list_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateOpportunityParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_ids: Option<Vec<i64>>,
}

impl AffinityClient {
    pub async fn get_opportunity(
        &self,
        opportunity_id: i64,
        params: &GetOpportunityParams,
    ) -> Result<Value> {
        let args = with_arg(to_args(params)?, "opportunity_id", opportunity_id);
        self.call("get_opportunity", args).await
    }

    pub async fn list_opportunities(&self, params: &ListOpportunitiesParams) -> Result<Value> {
        self.call("list_opportunities", to_args(params)?).await
    }

    pub async fn search_opportunities(
        &self,
        term: &str,
        params: &ListOpportunitiesParams,
    ) -> Result<Value> {
        let args = with_arg(to_args(params)?, "term", term);
        self.call("list_opportunities", args).await
    }

    pub fn list_all_opportunities(
        &self,
        params: &ListOpportunitiesParams,
    ) -> BoxStream<'static, Result<Value>> {
        self.call_all_args("list_opportunities", to_args(params))
    }

    pub async fn create_opportunity(&self, params: &CreateOpportunityParams) -> Result<Value> {
        self.call("create_opportunity", to_args(params)?).await
    }

    /// Replace an opportunity's attributes (sent as PUT)
    pub async fn update_opportunity(
        &self,
        opportunity_id: i64,
        params: &UpdateOpportunityParams,
    ) -> Result<Value> {
        let args = with_arg(to_args(params)?, "opportunity_id", opportunity_id);
        self.call("update_opportunity", args).await
    }

    pub async fn delete_opportunity(&self, opportunity_id: i64) -> Result<Value> {
        let args = with_arg(Map::new(), "opportunity_id", opportunity_id);
        self.call("delete_opportunity", args).await
    }
}
