//! Item documents

use super::Fields;
use crate::document::{EntityKind, Item};
use crate::resolve::{resolve_in_place, Resolution};
use crate::Result;
use serde_json::Value;

/// Refine a raw item
///
/// ```text
/// {
///     "apiName": "TFT7_Item_MirageEmblemItem",
///     "desc": "Wearer gains the Mirage trait",
///     "effects": {"MagicResist": 20.0},
///     "from": [6, 8],
///     "icon": "ASSETS/Maps/Particles/TFT/Item_Icons/Traits/Spatula/Set7/Mirage.TFT_Set7.dds",
///     "id": 2314,
///     "name": "Mirage Emblem",
///     "unique": true
/// }
/// ```
pub fn refine_item(doc: &Value) -> Result<Item> {
    refine_item_reported(doc).map(|(item, _)| item)
}

pub(crate) fn refine_item_reported(doc: &Value) -> Result<(Item, Resolution)> {
    let fields = Fields::new(EntityKind::Item, doc)?;
    let api_name = fields.api_name();
    let fields = fields.with_label(api_name);

    let description = fields.string("desc").filter(|d| !d.is_empty());

    let mut resolution = Resolution::default();
    let effects = fields.effects("effects").map(|mut effects| {
        resolution = resolve_in_place(description.as_deref(), &mut effects, api_name);
        effects
    });
    resolution.warn_unresolved(api_name);

    let item = Item {
        id: fields.i64("id"),
        name: fields.string("name"),
        description,
        api_name: api_name.map(str::to_string),
        icon_path: fields.string("icon"),
        effects,
        lower_items_ids: fields.i64_list("from"),
        is_unique: fields.bool("unique"),
    };

    Ok((item, resolution))
}
