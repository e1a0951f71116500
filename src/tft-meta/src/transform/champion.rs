//! Champion and ability documents

use super::Fields;
use crate::document::{Ability, Champion, EntityKind};
use crate::effects::{EffectValue, EffectsMap};
use crate::resolve::{resolve_in_place, Resolution};
use crate::Result;
use serde_json::Value;

/// Flatten `[{"name": .., "value": ..}, ..]` into a map keyed by name
///
/// Entries without a string name are dropped.
fn variables_to_map(variables: &[Value]) -> EffectsMap {
    variables
        .iter()
        .filter_map(|variable| {
            let name = variable.get("name")?.as_str()?;
            let value = variable
                .get("value")
                .cloned()
                .map(EffectValue::from)
                .unwrap_or(EffectValue::Null);
            Some((name, value))
        })
        .collect()
}

/// Refine a raw ability on its own
pub fn refine_ability(doc: &Value) -> Result<Ability> {
    refine_ability_reported(doc, None).map(|(ability, _)| ability)
}

/// Refine an ability, labelling log lines with the owning champion
pub(crate) fn refine_ability_reported(
    doc: &Value,
    champion: Option<&str>,
) -> Result<(Ability, Resolution)> {
    let fields = Fields::new(EntityKind::Ability, doc)?.with_label(champion);
    let description = fields.string("desc");
    let variables = fields.array("variables");

    let mut resolution = Resolution::default();
    let variable_dict = variables.map(|variables| {
        let mut dict = variables_to_map(variables);
        resolution = resolve_in_place(description.as_deref(), &mut dict, champion);
        dict
    });
    resolution.warn_unresolved(champion);

    let ability = Ability {
        icon: fields.string("icon"),
        name: fields.string("name"),
        description,
        variable_dict,
        variable_list: variables.cloned(),
    };

    Ok((ability, resolution))
}

/// Refine a raw champion, including its ability
pub fn refine_champion(doc: &Value) -> Result<Champion> {
    refine_champion_reported(doc).map(|(champion, _)| champion)
}

pub(crate) fn refine_champion_reported(doc: &Value) -> Result<(Champion, Resolution)> {
    let fields = Fields::new(EntityKind::Champion, doc)?;
    let api_name = fields.api_name();
    let fields = fields.with_label(api_name);

    let (ability, resolution) = match fields.raw("ability") {
        Some(raw) => match refine_ability_reported(raw, api_name) {
            Ok((ability, resolution)) => (Some(ability), resolution),
            Err(e) => {
                tracing::warn!(
                    "Dropping ability of '{}': {}",
                    api_name.unwrap_or("<unknown>"),
                    e
                );
                (None, Resolution::default())
            }
        },
        None => (None, Resolution::default()),
    };

    let champion = Champion {
        api_name: api_name.map(str::to_string),
        cost: fields.i64("cost"),
        icon: fields.string("icon"),
        name: fields.string("name"),
        stats: fields.value("stats"),
        traits: fields.string_list("traits"),
        ability,
    };

    Ok((champion, resolution))
}
