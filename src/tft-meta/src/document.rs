//! Normalized entity types
//!
//! These are the records handed to storage and written by the CLI. Field
//! names are part of the output contract and must stay stable.

use crate::batch::BatchReport;
use crate::effects::EffectsMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw document shapes understood by the transformer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Item,
    Champion,
    Ability,
    Trait,
    Set,
    SetData,
    Metadata,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Champion => write!(f, "champion"),
            Self::Ability => write!(f, "ability"),
            Self::Trait => write!(f, "trait"),
            Self::Set => write!(f, "set"),
            Self::SetData => write!(f, "set data"),
            Self::Metadata => write!(f, "metadata"),
        }
    }
}

/// Normalized item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Option<i64>,
    pub name: Option<String>,
    /// `None` when the raw description was missing or empty
    pub description: Option<String>,
    pub api_name: Option<String>,
    pub icon_path: Option<String>,
    pub effects: Option<EffectsMap>,
    /// Component item ids
    pub lower_items_ids: Option<Vec<i64>>,
    pub is_unique: Option<bool>,
}

/// Normalized champion ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub icon: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Variables keyed by name, with description tokens resolved
    pub variable_dict: Option<EffectsMap>,
    /// Raw `variables` list, kept for traceability
    pub variable_list: Option<Vec<serde_json::Value>>,
}

/// Normalized champion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub api_name: Option<String>,
    pub cost: Option<i64>,
    pub icon: Option<String>,
    pub name: Option<String>,
    pub stats: Option<serde_json::Value>,
    pub traits: Option<Vec<String>>,
    pub ability: Option<Ability>,
}

/// Normalized trait with one resolved effects map per tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub api_name: Option<String>,
    pub description: Option<String>,
    pub effects: Option<Vec<EffectsMap>>,
    pub icon: Option<String>,
    pub name: Option<String>,
}

/// Normalized set (both `sets` entries and `setData` entries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    pub champions: Vec<Champion>,
    pub traits: Vec<Trait>,
}

/// A fully refined metadata document
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RefinedMetadata {
    pub items: Vec<Item>,
    pub set_data: Vec<Set>,
    /// Keyed by set number as published
    pub sets: IndexMap<String, Set>,
    #[serde(skip)]
    pub report: BatchReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Item.to_string(), "item");
        assert_eq!(EntityKind::SetData.to_string(), "set data");
    }

    #[test]
    fn test_item_field_names() {
        let item = Item {
            id: Some(7),
            name: Some("Y".to_string()),
            description: None,
            api_name: Some("X".to_string()),
            icon_path: Some("p".to_string()),
            effects: Some(EffectsMap::new()),
            lower_items_ids: Some(vec![1, 2]),
            is_unique: Some(true),
        };

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "id": 7,
                "name": "Y",
                "description": null,
                "api_name": "X",
                "icon_path": "p",
                "effects": {},
                "lower_items_ids": [1, 2],
                "is_unique": true
            })
        );
    }

    #[test]
    fn test_set_skips_absent_passthrough_fields() {
        let set = Set {
            name: Some("Set9".to_string()),
            mutator: None,
            number: Some(9),
            champions: vec![],
            traits: vec![],
        };
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value, json!({"name": "Set9", "number": 9, "champions": [], "traits": []}));
    }
}
