//! Notes attached to persons, organizations and opportunities

use super::{EntityKind, EntityRef, PageParams};
use crate::api::client::{to_args, with_arg, AffinityClient};
use crate::error::Result;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateNoteParams {
    pub note: String,
    pub creator_id: i64,
    pub entity_id: i64,
    /// Person, organization or opportunity; list entries cannot hold notes
    pub entity_type: EntityKind,
}

impl CreateNoteParams {
    pub fn new(note: impl Into<String>, creator_id: i64, entity: EntityRef) -> Self {
        Self {
            note: note.into(),
            creator_id,
            entity_id: entity.id,
            entity_type: entity.kind,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateNoteParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn note_args(params: &PageParams, entity: EntityRef) -> Result<Map<String, Value>> {
    let args = with_arg(to_args(params)?, "entity_id", entity.id);
    Ok(with_arg(args, "entity_type", entity.kind.as_str()))
}

impl AffinityClient {
    pub async fn list_notes(&self, entity: EntityRef, params: &PageParams) -> Result<Value> {
        self.call("list_notes", note_args(params, entity)?).await
    }

    pub fn list_all_notes(
        &self,
        entity: EntityRef,
        params: &PageParams,
    ) -> BoxStream<'static, Result<Value>> {
        self.call_all_args("list_notes", note_args(params, entity))
    }

    pub async fn get_note(&self, note_id: i64) -> Result<Value> {
        self.call("get_note", with_arg(Map::new(), "note_id", note_id))
            .await
    }

    pub async fn create_note(&self, params: &CreateNoteParams) -> Result<Value> {
        self.call("create_note", to_args(params)?).await
    }

    pub async fn update_note(&self, note_id: i64, params: &UpdateNoteParams) -> Result<Value> {
        let args = with_arg(to_args(params)?, "note_id", note_id);
        self.call("update_note", args).await
    }

    pub async fn delete_note(&self, note_id: i64) -> Result<Value> {
        self.call("delete_note", with_arg(Map::new(), "note_id", note_id))
            .await
    }
}
