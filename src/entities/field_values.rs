//! Field values, their change history and update-or-create writes

use super::{int_enum, EntityKind, EntityRef};
use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::{Error, FieldViolation, Result, ValidationError};
use futures::stream::{BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

int_enum! {
    /// Kind of change recorded in a field value's history
    pub enum FieldValueChangeAction {
        Create = 0,
        Delete = 1,
        Update = 2,
    }
}

/// Filters for the field values of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListFieldValuesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateFieldValueParams {
    pub field_id: i64,
    pub entity_id: i64,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_entry_id: Option<i64>,
}

/// History of one field, optionally narrowed to a single entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListFieldValueChangesParams {
    pub field_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<FieldValueChangeAction>,
    #[serde(skip)]
    pub entity: Option<EntityRef>,
}

fn entity_args(args: Map<String, Value>, entity: EntityRef) -> Map<String, Value> {
    with_arg(args, entity.kind.id_param(), entity.id)
}

/// Whether an existing field value record is the one a set should overwrite
fn is_same_slot(record: &Value, field_id: i64, list_entry_id: Option<i64>) -> bool {
    let field_matches = record
        .get("field_id")
        .and_then(Value::as_i64)
        .map_or(true, |id| id == field_id);
    let entry_matches = match (list_entry_id, record.get("list_entry_id").and_then(Value::as_i64)) {
        (Some(wanted), Some(found)) => wanted == found,
        _ => true,
    };
    field_matches && entry_matches
}

impl AffinityClient {
    /// Field values attached to `entity`
    pub async fn list_field_values(
        &self,
        entity: EntityRef,
        params: &ListFieldValuesParams,
    ) -> Result<Value> {
        let args = entity_args(to_args(params)?, entity);
        self.call("list_field_values", args).await
    }

    pub fn list_all_field_values(
        &self,
        entity: EntityRef,
        params: &ListFieldValuesParams,
    ) -> BoxStream<'static, Result<Value>> {
        let args = to_args(params).map(|args| entity_args(args, entity));
        self.call_all_args("list_field_values", args)
    }

    pub async fn create_field_value(&self, params: &CreateFieldValueParams) -> Result<Value> {
        self.call("create_field_value", to_args(params)?).await
    }

    pub async fn update_field_value(&self, field_value_id: i64, value: Value) -> Result<Value> {
        let args = with_arg(
            with_arg(Map::new(), "field_value_id", field_value_id),
            "value",
            value,
        );
        self.call("update_field_value", args).await
    }

    pub async fn delete_field_value(&self, field_value_id: i64) -> Result<Value> {
        let args = with_arg(Map::new(), "field_value_id", field_value_id);
        self.call("delete_field_value", args).await
    }

    pub async fn list_field_value_changes(
        &self,
        params: &ListFieldValueChangesParams,
    ) -> Result<Value> {
        let mut args = to_args(params)?;
        if let Some(entity) = params.entity {
            args = entity_args(args, entity);
        }
        self.call("list_field_value_changes", args).await
    }

    /// Write `value` into a field of `entity`, updating the existing value if
    /// there is one and creating it otherwise
    ///
    /// `entity` is the person, organization or opportunity that owns the
    /// value; list-specific fields are addressed through `list_entry_id`.
    /// Every page of the lookup is searched. The lookup and the write are
    /// separate requests, so a value created concurrently in between can end
    /// up duplicated. A failed lookup is logged and treated as "no existing
    /// value".
    pub async fn set_field_value(
        &self,
        field_id: i64,
        entity: EntityRef,
        value: impl Into<Value>,
        list_entry_id: Option<i64>,
    ) -> Result<Value> {
        if entity.kind == EntityKind::ListEntry {
            return Err(Error::Validation(ValidationError {
                operation: "set_field_value".to_string(),
                violations: vec![FieldViolation::new(
                    "entity",
                    "must be a person, organization or opportunity; pass list entries as list_entry_id",
                )],
            }));
        }

        let value = value.into();
        let lookup = ListFieldValuesParams {
            field_id: Some(field_id),
            ..Default::default()
        };

        let mut records =
            self.call_all("list_field_values", entity_args(to_args(&lookup)?, entity));
        let mut existing = None;
        while let Some(record) = records.next().await {
            match record {
                Ok(record) if is_same_slot(&record, field_id, list_entry_id) => {
                    existing = record.get("id").and_then(Value::as_i64);
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        "Looking up field {} on {} failed, creating a new value: {}",
                        field_id,
                        entity,
                        e
                    );
                    break;
                }
            }
        }

        match existing {
            Some(field_value_id) => {
                tracing::debug!("Updating field value {}", field_value_id);
                self.update_field_value(field_value_id, value).await
            }
            None => {
                let params = CreateFieldValueParams {
                    field_id,
                    entity_id: entity.id,
                    value,
                    list_entry_id,
                };
                self.create_field_value(&params).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_same_slot() {
        assert!(is_same_slot(&json!({"id": 1, "field_id": 5}), 5, None));
        assert!(!is_same_slot(&json!({"id": 1, "field_id": 6}), 5, None));
        assert!(is_same_slot(&json!({"id": 1, "field_id": 5, "list_entry_id": 9}), 5, Some(9)));
        assert!(!is_same_slot(&json!({"id": 1, "field_id": 5, "list_entry_id": 8}), 5, Some(9)));
        assert!(is_same_slot(&json!({"id": 1}), 5, Some(9)));
    }

    #[test]
    fn test_entity_selector_becomes_query_arg() {
        let args = entity_args(Map::new(), EntityRef::organization(42));
        assert_eq!(Value::Object(args), json!({"organization_id": 42}));
    }

    #[test]
    fn test_change_params_keep_entity_out_of_serialization() {
        let params = ListFieldValueChangesParams {
            field_id: 3,
            action_type: Some(FieldValueChangeAction::Update),
            entity: Some(EntityRef::person(1)),
        };
        assert_eq!(
            Value::Object(to_args(&params).unwrap()),
            json!({"field_id": 3, "action_type": 2})
        );
    }
}
