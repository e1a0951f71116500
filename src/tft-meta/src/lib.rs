//! TFT metadata refinement
//!
//! Normalizes the per-entity documents published in CommunityDragon's TFT
//! metadata (items, champions with their abilities, traits and sets) and
//! resolves the effect values their descriptions reference.
//!
//! # Effect tokens
//!
//! Descriptions embed references such as `Deal @Damage@ damage` or
//! `@ShieldAmount*100@%`. The matching values live in the entity's effects
//! table, but names stripped from the game data are published under a
//! hashed alias instead:
//!
//! ```text
//! "effects": { "{59e94c40}": 50 }      // fnv1a("damage") = 0x59e94c40
//! ```
//!
//! Resolution moves such values back under their symbolic names, applying
//! the optional scale factor. See [`resolve`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tft_meta::{refine_item, EffectValue};
//!
//! let item = refine_item(&json!({
//!     "apiName": "TFT_Item_BFSword",
//!     "desc": "Deal @Damage@ damage",
//!     "effects": { "{59e94c40}": 50 },
//!     "from": [],
//!     "icon": "ASSETS/Items/BFSword.dds",
//!     "id": 1,
//!     "name": "B.F. Sword",
//!     "unique": false
//! }))
//! .unwrap();
//!
//! let effects = item.effects.unwrap();
//! assert_eq!(effects.get("Damage"), Some(&EffectValue::Integer(50)));
//! ```

pub mod batch;
mod document;
mod effects;
mod hash;
mod resolve;
pub mod transform;

pub use batch::{BatchReport, Failure};
pub use document::{Ability, Champion, EntityKind, Item, RefinedMetadata, Set, Trait};
pub use effects::{EffectValue, EffectsMap};
pub use hash::{fnv1a_hash, hashed_key, is_hashed_key, FNV1A_OFFSET_BASIS, FNV1A_PRIME};
pub use resolve::{resolve, resolve_in_place, tokens, Resolution, Token, UnresolvedToken};
pub use transform::{
    refine_ability, refine_champion, refine_item, refine_metadata, refine_metadata_str,
    refine_set, refine_set_data, refine_trait,
};

/// Errors from metadata refinement
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed {kind} document: expected an object, got {found}")]
    MalformedInput {
        kind: EntityKind,
        found: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
