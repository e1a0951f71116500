//! Set containers (`sets` and `setData` entries)

use super::{refine_champion_reported, refine_trait_reported, Fields};
use crate::batch::{refine_batch, BatchReport};
use crate::document::{EntityKind, Set};
use crate::Result;
use serde_json::Value;

/// Refine a `sets` entry
pub fn refine_set(doc: &Value) -> Result<Set> {
    refine_set_into(EntityKind::Set, doc, &mut BatchReport::default())
}

/// Refine a `setData` entry
pub fn refine_set_data(doc: &Value) -> Result<Set> {
    refine_set_into(EntityKind::SetData, doc, &mut BatchReport::default())
}

/// Refine a set container, folding its champion and trait batches into `report`
pub(crate) fn refine_set_into(
    kind: EntityKind,
    doc: &Value,
    report: &mut BatchReport,
) -> Result<Set> {
    let fields = Fields::new(kind, doc)?;
    let name = fields.str("name");
    let fields = fields.with_label(name);

    let champions = match fields.array("champions") {
        Some(docs) => {
            let (champions, batch) =
                refine_batch(EntityKind::Champion, docs, refine_champion_reported);
            report.merge(batch);
            champions
        }
        None => Vec::new(),
    };

    let traits = match fields.array("traits") {
        Some(docs) => {
            let (traits, batch) = refine_batch(EntityKind::Trait, docs, refine_trait_reported);
            report.merge(batch);
            traits
        }
        None => Vec::new(),
    };

    Ok(Set {
        name: name.map(str::to_string),
        mutator: fields.raw("mutator").and_then(Value::as_str).map(str::to_string),
        number: fields.raw("number").and_then(Value::as_i64),
        champions,
        traits,
    })
}
