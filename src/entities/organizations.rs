//! Organizations: lookup, search and CRUD

use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::Result;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetOrganizationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_opportunities: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_persons: Option<bool>,
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
pub struct ListOrganizationsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateOrganizationParams {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_ids: Option<Vec<i64>>,
}

impl CreateOrganizationParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrganizationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_ids: Option<Vec<i64>>,
}

impl AffinityClient {
    pub async fn get_organization(
        &self,
        organization_id: i64,
        params: &GetOrganizationParams,
    ) -> Result<Value> {
        let args = with_arg(to_args(params)?, "organization_id", organization_id);
        self.call("get_organization", args).await
    }

    pub async fn list_organizations(&self, params: &ListOrganizationsParams) -> Result<Value> {
        self.call("list_organizations", to_args(params)?).await
    }

    /// Search organizations by name or domain; `term` overrides any term in `params`
    pub async fn search_organizations(
        &self,
        term: &str,
        params: &ListOrganizationsParams,
    ) -> Result<Value> {
        let args = with_arg(to_args(params)?, "term", term);
        self.call("list_organizations", args).await
    }

    pub fn list_all_organizations(
        &self,
        params: &ListOrganizationsParams,
    ) -> BoxStream<'static, Result<Value>> {
        self.call_all_args("list_organizations", to_args(params))
    }

    pub async fn create_organization(&self, params: &CreateOrganizationParams) -> Result<Value> {
        self.call("create_organization", to_args(params)?).await
    }

    pub async fn update_organization(
        &self,
        organization_id: i64,
        params: &UpdateOrganizationParams,
    ) -> Result<Value> {
        let args = with_arg(to_args(params)?, "organization_id", organization_id);
        self.call("update_organization", args).await
    }

    pub async fn delete_organization(&self, organization_id: i64) -> Result<Value> {
        let args = with_arg(Map::new(), "organization_id", organization_id);
        self.call("delete_organization", args).await
    }
}
