//! Case and padding insensitive effects tables
//!
//! Effect keys in published metadata are spelled inconsistently (`Damage`,
//! `damage `, `DAMAGE`), so every key is canonicalized before it touches the
//! underlying map. The spelling of the most recent write is kept for output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// A single effect value
///
/// Mirrors the JSON value space. Only [`EffectValue::Integer`] and
/// [`EffectValue::Float`] count as numeric for scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<EffectValue>),
    Map(EffectsMap),
}

impl EffectValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&EffectsMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Multiply a numeric value by `scale`
    ///
    /// Numeric values become floats. Anything else is returned untouched.
    pub fn scaled(self, scale: f64) -> Self {
        match self.as_f64() {
            Some(v) => Self::Float(v * scale),
            None => self,
        }
    }
}

impl From<serde_json::Value> for EffectValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(obj) => Self::Map(obj.into_iter().collect()),
        }
    }
}

impl From<i64> for EffectValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for EffectValue {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for EffectValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for EffectValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for EffectValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for EffectValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<EffectsMap> for EffectValue {
    fn from(v: EffectsMap) -> Self {
        Self::Map(v)
    }
}

/// Effects table keyed case-insensitively, ignoring surrounding whitespace
///
/// Internally `canonical key -> (display key, value)`, in insertion order.
/// Writing a key that canonicalizes to an existing entry replaces both the
/// display key and the value, keeping the entry's position.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "IndexMap<String, EffectValue>")]
pub struct EffectsMap {
    entries: IndexMap<String, (String, EffectValue)>,
}

impl EffectsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase and trim a key
    pub fn canonicalize(key: &str) -> String {
        key.trim().to_lowercase()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a value, returning the previous value for the same canonical key
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<EffectValue>,
    ) -> Option<EffectValue> {
        let display = key.into();
        let canonical = Self::canonicalize(&display);
        self.entries
            .insert(canonical, (display, value.into()))
            .map(|(_, old)| old)
    }

    pub fn get(&self, key: &str) -> Option<&EffectValue> {
        self.entries.get(&Self::canonicalize(key)).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut EffectValue> {
        self.entries
            .get_mut(&Self::canonicalize(key))
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&Self::canonicalize(key))
    }

    /// Remove an entry, preserving the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<EffectValue> {
        self.entries
            .shift_remove(&Self::canonicalize(key))
            .map(|(_, v)| v)
    }

    /// Iterate `(display key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EffectValue)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(k, _)| k.as_str())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut EffectValue> {
        self.entries.values_mut().map(|(_, v)| v)
    }
}

impl<K: Into<String>, V: Into<EffectValue>> FromIterator<(K, V)> for EffectsMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for EffectsMap {
    type Item = (String, EffectValue);
    type IntoIter = indexmap::map::IntoValues<String, (String, EffectValue)>;

    /// Consume the map, yielding `(display key, value)` pairs
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl From<IndexMap<String, EffectValue>> for EffectsMap {
    fn from(map: IndexMap<String, EffectValue>) -> Self {
        map.into_iter().collect()
    }
}

impl Serialize for EffectsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
