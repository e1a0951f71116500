//! Row types for the items table

use crate::repository::RepoError;
use serde::{Deserialize, Serialize};
use tft_meta::{EffectsMap, Item};

/// Table holding refined items
pub const ITEMS_TABLE: &str = "api_documents_items";

/// One row of [`ITEMS_TABLE`]
///
/// `effects` and `from_coord` hold JSON text; [`ItemRow::effects`] and
/// [`ItemRow::components`] decode them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub api_name: String,
    pub description: Option<String>,
    pub effects: Option<String>,
    pub from_coord: Option<String>,
    pub icon: Option<String>,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub unique: Option<bool>,
}

impl ItemRow {
    /// Decoded effects column
    pub fn effects(&self) -> Result<Option<EffectsMap>, RepoError> {
        self.effects
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(RepoError::from)
    }

    /// Decoded component ids
    pub fn components(&self) -> Result<Option<Vec<i64>>, RepoError> {
        self.from_coord
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(RepoError::from)
    }

    /// Rebuild the refined item this row was stored from
    pub fn to_item(&self) -> Result<Item, RepoError> {
        Ok(Item {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            api_name: Some(self.api_name.clone()),
            icon_path: self.icon.clone(),
            effects: self.effects()?,
            lower_items_ids: self.components()?,
            is_unique: self.unique,
        })
    }
}

impl TryFrom<&Item> for ItemRow {
    type Error = RepoError;

    fn try_from(item: &Item) -> Result<Self, Self::Error> {
        let api_name = item.api_name.clone().ok_or_else(|| {
            RepoError::MissingKey(
                item.name
                    .clone()
                    .or_else(|| item.id.map(|id| format!("id {}", id)))
                    .unwrap_or_else(|| "<unnamed>".to_string()),
            )
        })?;

        let effects = item.effects.as_ref().map(serde_json::to_string).transpose()?;
        let from_coord = item
            .lower_items_ids
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(Self {
            api_name,
            description: item.description.clone(),
            effects,
            from_coord,
            icon: item.icon_path.clone(),
            id: item.id,
            name: item.name.clone(),
            unique: item.is_unique,
        })
    }
}
