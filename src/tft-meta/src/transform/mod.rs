//! Raw metadata document transforms
//!
//! Each entity kind has a `refine_*` function taking the raw JSON document.
//! A document that is not a JSON object is rejected with
//! [`Error::MalformedInput`]; any individual field that is missing or has an
//! unexpected type becomes `None` in the output instead.

mod champion;
mod item;
mod set;
mod traits;

pub use champion::{refine_ability, refine_champion};
pub use item::refine_item;
pub use set::{refine_set, refine_set_data};
pub use traits::refine_trait;

pub(crate) use champion::refine_champion_reported;
pub(crate) use item::refine_item_reported;
pub(crate) use traits::refine_trait_reported;

use crate::batch::{refine_batch, BatchReport};
use crate::document::{EntityKind, Item, RefinedMetadata, Set};
use crate::effects::EffectsMap;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Top-level sections of a CommunityDragon metadata document
pub mod sections {
    pub const ITEMS: &str = "items";
    pub const SET_DATA: &str = "setData";
    pub const SETS: &str = "sets";
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed, logging field access over one raw document
pub(crate) struct Fields<'a> {
    kind: EntityKind,
    obj: &'a Map<String, Value>,
    label: Option<&'a str>,
}

impl<'a> Fields<'a> {
    /// Accept only keyed records
    pub fn new(kind: EntityKind, doc: &'a Value) -> Result<Self> {
        let obj = doc.as_object().ok_or(Error::MalformedInput {
            kind,
            found: type_name(doc),
        })?;
        Ok(Self {
            kind,
            obj,
            label: None,
        })
    }

    /// Name used in log lines for this document
    pub fn with_label(mut self, label: Option<&'a str>) -> Self {
        self.label = label;
        self
    }

    /// Field value without type checks; absent fields are not logged
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    fn missing(&self, key: &str) {
        tracing::debug!(
            "{} '{}' has no usable '{}' field",
            self.kind,
            self.label.unwrap_or("<unknown>"),
            key
        );
    }

    fn typed<T>(&self, key: &str, convert: impl FnOnce(&'a Value) -> Option<T>) -> Option<T> {
        let value = self.raw(key).and_then(convert);
        if value.is_none() {
            self.missing(key);
        }
        value
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.typed(key, Value::as_str)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.str(key).map(str::to_string)
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.typed(key, Value::as_i64)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.typed(key, Value::as_bool)
    }

    pub fn array(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.typed(key, Value::as_array)
    }

    pub fn object(&self, key: &str) -> Option<&'a Value> {
        self.typed(key, |v| v.is_object().then_some(v))
    }

    /// Object field as an effects map
    pub fn effects(&self, key: &str) -> Option<EffectsMap> {
        self.typed(key, |v| {
            v.as_object()
                .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        })
    }

    /// Any non-null value, cloned
    pub fn value(&self, key: &str) -> Option<Value> {
        self.typed(key, |v| Some(v.clone()))
    }

    /// Array of integers; `None` if any element is not one
    pub fn i64_list(&self, key: &str) -> Option<Vec<i64>> {
        self.typed(key, |v| v.as_array()?.iter().map(Value::as_i64).collect())
    }

    /// Array of strings; `None` if any element is not one
    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        self.typed(key, |v| {
            v.as_array()?
                .iter()
                .map(|s| s.as_str().map(str::to_string))
                .collect()
        })
    }

    /// `apiName`, falling back to the snake_case spelling
    pub fn api_name(&self) -> Option<&'a str> {
        self.raw("apiName")
            .or_else(|| self.raw("api_name"))
            .and_then(Value::as_str)
            .or_else(|| {
                self.missing("apiName");
                None
            })
    }
}

/// Refine a list of raw items
pub fn refine_items(docs: &[Value]) -> (Vec<Item>, BatchReport) {
    refine_batch(EntityKind::Item, docs, refine_item_reported)
}

/// Refine the `setData` list
pub fn refine_set_data_list(docs: &[Value]) -> (Vec<Set>, BatchReport) {
    let mut report = BatchReport::default();
    let mut sets = Vec::with_capacity(docs.len());
    for (index, doc) in docs.iter().enumerate() {
        match set::refine_set_into(EntityKind::SetData, doc, &mut report) {
            Ok(set) => sets.push(set),
            Err(e) => report.record_failure(EntityKind::SetData, index, e),
        }
    }
    (sets, report)
}

/// Refine the `sets` object, keeping its keys
pub fn refine_sets(sets: &Map<String, Value>) -> (IndexMap<String, Set>, BatchReport) {
    let mut report = BatchReport::default();
    let mut out = IndexMap::with_capacity(sets.len());
    for (index, (key, doc)) in sets.iter().enumerate() {
        match set::refine_set_into(EntityKind::Set, doc, &mut report) {
            Ok(set) => {
                out.insert(key.clone(), set);
            }
            Err(e) => report.record_failure(EntityKind::Set, index, e),
        }
    }
    (out, report)
}

/// Refine a whole metadata document
///
/// Sections that are absent or of the wrong shape come out empty.
pub fn refine_metadata(doc: &Value) -> Result<RefinedMetadata> {
    let fields = Fields::new(EntityKind::Metadata, doc)?;
    let mut refined = RefinedMetadata::default();

    if let Some(items) = fields.array(sections::ITEMS) {
        let (items, report) = refine_items(items);
        refined.items = items;
        refined.report.merge(report);
    }

    if let Some(set_data) = fields.array(sections::SET_DATA) {
        let (set_data, report) = refine_set_data_list(set_data);
        refined.set_data = set_data;
        refined.report.merge(report);
    }

    if let Some(sets) = fields.object(sections::SETS).and_then(Value::as_object) {
        let (sets, report) = refine_sets(sets);
        refined.sets = sets;
        refined.report.merge(report);
    }

    tracing::info!(
        "Refined {} items, {} set data entries, {} sets ({} entities, {} failures, {} unresolved tokens)",
        refined.items.len(),
        refined.set_data.len(),
        refined.sets.len(),
        refined.report.refined,
        refined.report.failures.len(),
        refined.report.unresolved_tokens
    );

    Ok(refined)
}

/// Parse and refine a metadata document from JSON text
pub fn refine_metadata_str(json: &str) -> Result<RefinedMetadata> {
    let doc: Value = serde_json::from_str(json)?;
    refine_metadata(&doc)
}
