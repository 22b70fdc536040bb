//! Account-level endpoints: identity, rate limits and relationship strength

use crate::api::client::{with_arg, AffinityClient};
use crate::error::Result;
use serde_json::{Map, Value};

impl AffinityClient {
    /// Identity of the API key's owner and its tenant
    pub async fn whoami(&self) -> Result<Value> {
        self.call("whoami", Map::new()).await
    }

    pub async fn get_rate_limit_status(&self) -> Result<Value> {
        self.call("get_rate_limit_status", Map::new()).await
    }

    /// Relationship strength between an external person and the team, or one
    /// internal member when `internal_id` is set
    pub async fn get_relationship_strengths(
        &self,
        external_id: i64,
        internal_id: Option<i64>,
    ) -> Result<Value> {
        let mut args = with_arg(Map::new(), "external_id", external_id);
        if let Some(internal_id) = internal_id {
            args = with_arg(args, "internal_id", internal_id);
        }
        self.call("get_relationship_strengths", args).await
    }
}
