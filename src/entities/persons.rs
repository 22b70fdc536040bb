//! Persons: lookup, search and CRUD

use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::Result;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Optional expansions for a single person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetPersonParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_interaction_dates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_interaction_persons: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_opportunities: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_current_organizations: Option<bool>,
}

/// Interaction date a person search can be bounded by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionDateKind {
    FirstEmail,
    LastEmail,
    LastInteraction,
    LastEvent,
    NextEvent,
}

impl InteractionDateKind {
    fn stem(self) -> &'static str {
        match self {
            InteractionDateKind::FirstEmail => "first_email",
            InteractionDateKind::LastEmail => "last_email",
            InteractionDateKind::LastInteraction => "last_interaction",
            InteractionDateKind::LastEvent => "last_event",
            InteractionDateKind::NextEvent => "next_event",
        }
    }
}

/// Date window on one interaction date, sent as `min_<kind>_date` / `max_<kind>_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionDateFilter {
    pub kind: InteractionDateKind,
    pub min: Option<DateTime<Utc>>,
    pub max: Option<DateTime<Utc>>,
}

impl InteractionDateFilter {
    pub fn new(kind: InteractionDateKind) -> Self {
        Self {
            kind,
            min: None,
            max: None,
        }
    }

    pub fn since(mut self, min: DateTime<Utc>) -> Self {
        self.min = Some(min);
        self
    }

    pub fn until(mut self, max: DateTime<Utc>) -> Self {
        self.max = Some(max);
        self
    }

    fn apply(&self, args: &mut Map<String, Value>) {
        if let Some(min) = self.min {
            args.insert(
                format!("min_{}_date", self.kind.stem()),
                Value::String(min.to_rfc3339()),
            );
        }
        if let Some(max) = self.max {
            args.insert(
                format!("max_{}_date", self.kind.stem()),
                Value::String(max.to_rfc3339()),
            );
        }
    }
}

/// Search and paging options for persons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListPersonsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_interaction_dates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_interaction_persons: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_opportunities: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_current_organizations: Option<bool>,
    /// Interaction date windows, one per kind
    #[serde(skip)]
    pub interaction_dates: Vec<InteractionDateFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl ListPersonsParams {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Default::default()
        }
    }

    fn to_args(&self) -> Result<Map<String, Value>> {
        let mut args = to_args(self)?;
        for filter in &self.interaction_dates {
            filter.apply(&mut args);
        }
        Ok(args)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePersonParams {
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_ids: Option<Vec<i64>>,
}

impl CreatePersonParams {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(email.into());
        self
    }
}

/// Partial update; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePersonParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_ids: Option<Vec<i64>>,
}

impl AffinityClient {
    pub async fn get_person(&self, person_id: i64, params: &GetPersonParams) -> Result<Value> {
        let args = with_arg(to_args(params)?, "person_id", person_id);
        self.call("get_person", args).await
    }

    /// Fetch one page of persons
    pub async fn list_persons(&self, params: &ListPersonsParams) -> Result<Value> {
        self.call("list_persons", params.to_args()?).await
    }

    /// Every person matching `params`, across all pages
    pub fn list_all_persons(&self, params: &ListPersonsParams) -> BoxStream<'static, Result<Value>> {
        self.call_all_args("list_persons", params.to_args())
    }

    pub async fn create_person(&self, params: &CreatePersonParams) -> Result<Value> {
        self.call("create_person", to_args(params)?).await
    }

    pub async fn update_person(&self, person_id: i64, params: &UpdatePersonParams) -> Result<Value> {
        let args = with_arg(to_args(params)?, "person_id", person_id);
        self.call("update_person", args).await
    }

    pub async fn delete_person(&self, person_id: i64) -> Result<Value> {
        let args = with_arg(Map::new(), "person_id", person_id);
        self.call("delete_person", args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{get_operation, validate};
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_interaction_date_filter_names() {
        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let params = ListPersonsParams {
            interaction_dates: vec![InteractionDateFilter::new(InteractionDateKind::LastEmail)
                .since(since)],
            ..ListPersonsParams::term("smith")
        };

        let args = params.to_args().unwrap();
        assert_eq!(args["term"], json!("smith"));
        assert!(args.contains_key("min_last_email_date"));
        assert!(!args.contains_key("max_last_email_date"));

        let def = get_operation("list_persons").unwrap();
        let normalized = validate("list_persons", def, &args).unwrap();
        assert!(normalized.query_value("min_last_email_date").is_some());
    }

    #[test]
    fn test_create_person_body() {
        let params = CreatePersonParams::new("Ada", "Lovelace").email("ada@example.com");
        let args = to_args(&params).unwrap();
        assert_eq!(
            Value::Object(args),
            json!({"first_name": "Ada", "last_name": "Lovelace", "emails": ["ada@example.com"]})
        );
    }

    #[test]
    fn test_update_person_sends_only_set_fields() {
        let params = UpdatePersonParams {
            last_name: Some("Byron".to_string()),
            ..Default::default()
        };
        assert_eq!(Value::Object(to_args(&params).unwrap()), json!({"last_name": "Byron"}));
    }
}
