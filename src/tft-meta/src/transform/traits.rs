//! Trait documents
//!
//! A trait carries one effects map per activation tier. Tier maps usually
//! nest their hashed values one level down (under `variables`), so after the
//! tier itself is resolved each nested map is resolved once more against the
//! same description. Deeper nesting is left alone.

use super::Fields;
use crate::document::{EntityKind, Trait};
use crate::effects::{EffectValue, EffectsMap};
use crate::resolve::{resolve_in_place, Resolution};
use crate::Result;
use serde_json::Value;

/// Resolve one tier and its directly nested maps
fn resolve_tier(
    description: Option<&str>,
    tier: &mut EffectsMap,
    label: Option<&str>,
) -> Resolution {
    let mut resolution = resolve_in_place(description, tier, label);

    let mut nested_passes = Vec::new();
    for value in tier.values_mut() {
        if let EffectValue::Map(nested) = value {
            nested_passes.push(resolve_in_place(description, nested, label));
        }
    }

    // A token counts as unresolved only if no pass could place it
    for pass in nested_passes {
        resolution.retain_unresolved_in(&pass);
        resolution.resolved.extend(pass.resolved);
    }
    resolution
}

/// Refine a raw trait
pub fn refine_trait(doc: &Value) -> Result<Trait> {
    refine_trait_reported(doc).map(|(t, _)| t)
}

pub(crate) fn refine_trait_reported(doc: &Value) -> Result<(Trait, Resolution)> {
    let fields = Fields::new(EntityKind::Trait, doc)?;
    let api_name = fields.api_name();
    let fields = fields.with_label(api_name);
    let description = fields.string("desc");

    let mut resolution = Resolution::default();
    let effects = fields.array("effects").map(|tiers| {
        tiers
            .iter()
            .enumerate()
            .filter_map(|(index, tier)| match EffectValue::from(tier.clone()) {
                EffectValue::Map(mut tier) => {
                    let pass = resolve_tier(description.as_deref(), &mut tier, api_name);
                    resolution.resolved.extend(pass.resolved);
                    resolution.unresolved.extend(pass.unresolved);
                    Some(tier)
                }
                _ => {
                    tracing::debug!(
                        "Trait '{}' tier {} is not an object, skipping",
                        api_name.unwrap_or("<unknown>"),
                        index
                    );
                    None
                }
            })
            .collect::<Vec<_>>()
    });
    resolution.warn_unresolved(api_name);

    let refined = Trait {
        api_name: api_name.map(str::to_string),
        description,
        effects,
        icon: fields.string("icon"),
        name: fields.string("name"),
    };

    Ok((refined, resolution))
}
