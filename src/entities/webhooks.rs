//! Webhook subscriptions

use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateWebhookParams {
    /// http(s) endpoint receiving the events
    pub url: String,
    pub event: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateWebhookParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

fn subscription(webhook_id: &str) -> Map<String, Value> {
    with_arg(Map::new(), "webhook_subscription_id", webhook_id)
}

impl AffinityClient {
    pub async fn list_webhooks(&self) -> Result<Value> {
        self.call("list_webhooks", Map::new()).await
    }

    pub async fn get_webhook(&self, webhook_id: &str) -> Result<Value> {
        self.call("get_webhook", subscription(webhook_id)).await
    }

    pub async fn create_webhook(&self, params: &CreateWebhookParams) -> Result<Value> {
        self.call("create_webhook", to_args(params)?).await
    }

    pub async fn update_webhook(
        &self,
        webhook_id: &str,
        params: &UpdateWebhookParams,
    ) -> Result<Value> {
        let mut args = to_args(params)?;
        args.extend(subscription(webhook_id));
        self.call("update_webhook", args).await
    }

    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<Value> {
        self.call("delete_webhook", subscription(webhook_id)).await
    }
}
