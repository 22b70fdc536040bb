//! Typed resource methods
//!
//! Thin wrappers over [`AffinityClient::call`](crate::AffinityClient::call):
//! each one serializes a parameter struct, adds its path arguments and names
//! the operation to run. Results are the raw JSON payloads.

mod field_values;
mod fields;
mod interactions;
mod lists;
mod notes;
mod opportunities;
mod organizations;
mod persons;
mod utility;
mod webhooks;

pub use field_values::{
    CreateFieldValueParams, FieldValueChangeAction, ListFieldValueChangesParams,
    ListFieldValuesParams,
};
pub use fields::{CreateFieldParams, FieldValueType, ListFieldsParams};
pub use interactions::{
    CreateInteractionParams, InteractionType, ListInteractionsParams, UpdateInteractionParams,
};
pub use lists::{AddListEntryParams, CreateListParams};
pub use notes::{CreateNoteParams, UpdateNoteParams};
pub use opportunities::{
    CreateOpportunityParams, GetOpportunityParams, ListOpportunitiesParams,
    UpdateOpportunityParams,
};
pub use organizations::{
    CreateOrganizationParams, GetOrganizationParams, ListOrganizationsParams,
    UpdateOrganizationParams,
};
pub use persons::{
    CreatePersonParams, GetPersonParams, InteractionDateFilter, InteractionDateKind,
    ListPersonsParams, UpdatePersonParams,
};
pub use webhooks::{CreateWebhookParams, UpdateWebhookParams};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Enum carried on the wire as a small integer code
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Wire code
            pub fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let code = u8::deserialize(deserializer)?;
                Self::from_code(code).ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown {} code {}", stringify!($name), code))
                })
            }
        }
    };
}

pub(crate) use int_enum;

int_enum! {
    /// Kind of record a list or field is attached to
    pub enum EntityType {
        Person = 0,
        Organization = 1,
        Opportunity = 8,
    }
}

/// Kind of record a field value, note or interaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Person,
    Organization,
    Opportunity,
    ListEntry,
}

impl EntityKind {
    /// Query parameter selecting records of this kind
    pub fn id_param(self) -> &'static str {
        match self {
            EntityKind::Person => "person_id",
            EntityKind::Organization => "organization_id",
            EntityKind::Opportunity => "opportunity_id",
            EntityKind::ListEntry => "list_entry_id",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Organization => "organization",
            EntityKind::Opportunity => "opportunity",
            EntityKind::ListEntry => "list_entry",
        }
    }
}

/// A specific record: its kind plus its ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn person(id: i64) -> Self {
        Self::new(EntityKind::Person, id)
    }

    pub fn organization(id: i64) -> Self {
        Self::new(EntityKind::Organization, id)
    }

    pub fn opportunity(id: i64) -> Self {
        Self::new(EntityKind::Opportunity, id)
    }

    pub fn list_entry(id: i64) -> Self {
        Self::new(EntityKind::ListEntry, id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.id)
    }
}

/// Cursor parameters shared by list operations without other filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl PageParams {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: Some(page_size),
            page_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_type_wire_codes() {
        assert_eq!(serde_json::to_value(EntityType::Opportunity).unwrap(), json!(8));
        let parsed: EntityType = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(parsed, EntityType::Organization);
        assert!(serde_json::from_value::<EntityType>(json!(5)).is_err());
    }

    #[test]
    fn test_entity_kind_names() {
        assert_eq!(serde_json::to_value(EntityKind::ListEntry).unwrap(), json!("list_entry"));
        assert_eq!(EntityKind::Organization.id_param(), "organization_id");
        assert_eq!(EntityRef::person(7).to_string(), "person 7");
    }

    #[test]
    fn test_page_params_reject_unknown_fields() {
        let err = serde_json::from_value::<PageParams>(json!({"page_sise": 10}));
        assert!(err.is_err());
        let ok: PageParams = serde_json::from_value(json!({"page_size": 10})).unwrap();
        assert_eq!(ok, PageParams::with_page_size(10));
    }
}
