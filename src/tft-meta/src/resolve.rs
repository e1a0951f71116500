//! Effect token resolution
//!
//! Descriptions reference effect values through `@Name@` or `@Name*Scale@`
//! tokens. When a name was stripped from the published data the value sits
//! under its hashed alias instead (see [`crate::hash`]). Resolution moves
//! each such value back under its symbolic name, applying the scale factor
//! to numeric values.

use crate::effects::{EffectValue, EffectsMap};
use crate::hash::hashed_key;
use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest `@...@` span, never crossing a line break
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(.*?)@").expect("token pattern is a valid regex"));

/// A `@...@` reference inside a description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Text between the delimiters
    pub raw: &'a str,
    /// Symbolic name (text before the first `*`)
    pub name: &'a str,
    /// Unparsed scale factor (text after the first `*`)
    pub scale: Option<&'a str>,
}

impl<'a> Token<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('*') {
            Some((name, scale)) => Self {
                raw,
                name,
                scale: Some(scale),
            },
            None => Self {
                raw,
                name: raw,
                scale: None,
            },
        }
    }
}

/// Extract every token from a description, in order, duplicates included
pub fn tokens(description: &str) -> impl Iterator<Item = Token<'_>> {
    TOKEN_PATTERN
        .captures_iter(description)
        .filter_map(|caps| caps.get(1))
        .map(|m| Token::parse(m.as_str()))
}

/// A token with neither a symbolic nor a hashed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedToken {
    pub name: String,
    pub hashed_key: String,
}

/// Outcome of resolving one description against one effects map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Names moved from a hashed alias to their symbolic key
    pub resolved: Vec<String>,
    pub unresolved: Vec<UnresolvedToken>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Keep only unresolved tokens that `other` failed to resolve as well
    pub fn retain_unresolved_in(&mut self, other: &Resolution) {
        self.unresolved.retain(|token| {
            other
                .unresolved
                .iter()
                .any(|o| o.name.eq_ignore_ascii_case(&token.name))
        });
    }

    /// Log every unresolved token as a warning
    pub fn warn_unresolved(&self, entity: Option<&str>) {
        for token in &self.unresolved {
            tracing::warn!(
                "Cannot map effect token for '{}': '{}' ({})",
                entity.unwrap_or("<unknown>"),
                token.name,
                token.hashed_key
            );
        }
    }
}

fn is_present(value: Option<&EffectValue>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

/// Resolve description tokens into `effects`, mutating it in place
///
/// Tokens already present under their raw text are left alone. For the
/// others the hashed alias of the name is looked up; when found it is
/// removed and its value reinserted under the name, multiplied by the scale
/// factor if both are numeric. Null values count as missing.
///
/// Unresolved tokens never fail the call; they are reported, not logged.
pub fn resolve_in_place(
    description: Option<&str>,
    effects: &mut EffectsMap,
    entity: Option<&str>,
) -> Resolution {
    let mut resolution = Resolution::default();
    let Some(description) = description else {
        return resolution;
    };

    for token in tokens(description) {
        if is_present(effects.get(token.raw)) {
            continue;
        }

        let key = hashed_key(token.name);
        if !is_present(effects.get(&key)) {
            // Scaled tokens resolved by an earlier occurrence
            if is_present(effects.get(token.name)) {
                continue;
            }
            resolution.unresolved.push(UnresolvedToken {
                name: token.name.to_string(),
                hashed_key: key,
            });
            continue;
        }

        let Some(value) = effects.remove(&key) else {
            continue;
        };
        let value = match token.scale {
            Some(scale) if value.is_numeric() => match scale.trim().parse::<f64>() {
                Ok(factor) => value.scaled(factor),
                Err(_) => {
                    tracing::debug!(
                        "Ignoring unparseable scale '{}' on '{}' for '{}'",
                        scale,
                        token.name,
                        entity.unwrap_or("<unknown>")
                    );
                    value
                }
            },
            _ => value,
        };

        effects.insert(token.name, value);
        resolution.resolved.push(token.name.to_string());
    }

    resolution
}

/// Resolve description tokens, taking and returning ownership of the map
///
/// A `None` description returns `effects` untouched. Unresolved tokens
/// are logged at warn level.
///
/// # Example
///
/// ```
/// use tft_meta::{hashed_key, resolve, EffectValue, EffectsMap};
///
/// let mut effects = EffectsMap::new();
/// effects.insert(hashed_key("Shield"), 10.0);
///
/// let effects = resolve(Some("Gain a @Shield*2@ shield"), effects, None);
/// assert_eq!(effects.get("Shield"), Some(&EffectValue::Float(20.0)));
/// ```
pub fn resolve(
    description: Option<&str>,
    mut effects: EffectsMap,
    entity: Option<&str>,
) -> EffectsMap {
    resolve_in_place(description, &mut effects, entity).warn_unresolved(entity);
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashed(pairs: &[(&str, EffectValue)]) -> EffectsMap {
        pairs
            .iter()
            .map(|(name, value)| (hashed_key(name), value.clone()))
            .collect()
    }

    #[test]
    fn test_tokens_in_order_with_duplicates() {
        let found: Vec<_> = tokens("Deal @Damage@ then @AP*100@ and @Damage@ again")
            .map(|t| t.raw)
            .collect();
        assert_eq!(found, vec!["Damage", "AP*100", "Damage"]);
    }

    #[test]
    fn test_tokens_shortest_match() {
        let found: Vec<_> = tokens("@A@ text @B@").map(|t| t.raw).collect();
        assert_eq!(found, vec!["A", "B"]);

        // A stray delimiter pairs with the next one
        let found: Vec<_> = tokens("50% @ range @Mana@").map(|t| t.raw).collect();
        assert_eq!(found, vec![" range "]);
    }

    #[test]
    fn test_tokens_do_not_cross_lines() {
        assert_eq!(tokens("@broken\nline@").count(), 0);
    }

    #[test]
    fn test_token_parse() {
        let t = Token::parse("Shield*2");
        assert_eq!(t.name, "Shield");
        assert_eq!(t.scale, Some("2"));

        let t = Token::parse("Damage");
        assert_eq!(t.name, "Damage");
        assert_eq!(t.scale, None);

        // Only the first '*' splits
        let t = Token::parse("A*2*3");
        assert_eq!(t.name, "A");
        assert_eq!(t.scale, Some("2*3"));
    }

    #[test]
    fn test_resolve_none_description_is_identity() {
        let effects = hashed(&[("Damage", EffectValue::Integer(50))]);
        let out = resolve(None, effects.clone(), Some("X"));
        assert_eq!(out, effects);
    }

    #[test]
    fn test_resolve_hashed_key() {
        let effects = hashed(&[("Damage", EffectValue::Integer(50))]);
        let out = resolve(Some("Deal @Damage@ damage"), effects, None);

        assert_eq!(out.get("Damage"), Some(&EffectValue::Integer(50)));
        assert!(!out.contains_key(&hashed_key("Damage")));
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["Damage"]);
    }

    #[test]
    fn test_resolve_scales_numeric_values() {
        let effects = hashed(&[("shield", EffectValue::Float(10.0))]);
        let out = resolve(Some("@Shield*2@"), effects, None);

        assert_eq!(out.get("Shield"), Some(&EffectValue::Float(20.0)));
        assert!(!out.contains_key(&hashed_key("shield")));
    }

    #[test]
    fn test_resolve_scales_integers_to_float() {
        let effects = hashed(&[("AS", EffectValue::Integer(3))]);
        let out = resolve(Some("@AS*0.5@"), effects, None);
        assert_eq!(out.get("as"), Some(&EffectValue::Float(1.5)));
    }

    #[test]
    fn test_resolve_does_not_scale_strings() {
        let effects = hashed(&[("shield", EffectValue::from("ten"))]);
        let out = resolve(Some("@Shield*2@"), effects, None);

        assert_eq!(out.get("Shield"), Some(&EffectValue::from("ten")));
        assert!(!out.contains_key(&hashed_key("shield")));
    }

    #[test]
    fn test_resolve_bad_scale_keeps_value() {
        let effects = hashed(&[("shield", EffectValue::Integer(10))]);
        let out = resolve(Some("@Shield*lots@"), effects, None);
        assert_eq!(out.get("Shield"), Some(&EffectValue::Integer(10)));
    }

    #[test]
    fn test_resolve_unresolved_token() {
        let effects = hashed(&[("Damage", EffectValue::Integer(50))]);
        let mut out = effects.clone();
        let report = resolve_in_place(Some("Heal @Healing@"), &mut out, Some("X"));

        assert_eq!(out, effects);
        assert!(!out.contains_key("Healing"));
        assert!(!report.is_complete());
        assert_eq!(report.unresolved[0].name, "Healing");
        assert_eq!(report.unresolved[0].hashed_key, hashed_key("healing"));
    }

    #[test]
    fn test_resolve_existing_symbolic_key_untouched() {
        let mut effects = hashed(&[("Damage", EffectValue::Integer(50))]);
        effects.insert("damage", 10);
        let out = resolve(Some("@Damage@"), effects.clone(), None);
        assert_eq!(out, effects);
    }

    #[test]
    fn test_resolve_null_symbolic_value_is_replaced() {
        let mut effects = hashed(&[("Damage", EffectValue::Integer(50))]);
        effects.insert("Damage", EffectValue::Null);
        let out = resolve(Some("@Damage@"), effects, None);
        assert_eq!(out.get("damage"), Some(&EffectValue::Integer(50)));
    }

    #[test]
    fn test_resolve_null_hashed_value_is_missing() {
        let effects = hashed(&[("Damage", EffectValue::Null)]);
        let mut out = effects.clone();
        let report = resolve_in_place(Some("@Damage@"), &mut out, None);
        assert_eq!(out, effects);
        assert_eq!(report.unresolved.len(), 1);
    }

    #[test]
    fn test_resolve_repeated_tokens() {
        let effects = hashed(&[("Damage", EffectValue::Integer(50))]);
        let mut out = effects;
        let report = resolve_in_place(Some("@Damage@ and @Damage@"), &mut out, None);

        assert_eq!(report.resolved, vec!["Damage"]);
        assert!(report.is_complete());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_second_pass_reports_nothing() {
        let desc = Some("@Shield*2@ and @Shield*2@");
        let mut effects = hashed(&[("Shield", EffectValue::Float(10.0))]);

        let first = resolve_in_place(desc, &mut effects, None);
        assert_eq!(first.resolved, vec!["Shield"]);
        assert!(first.is_complete());

        let second = resolve_in_place(desc, &mut effects, None);
        assert_eq!(second, Resolution::default());
        assert_eq!(effects.get("shield"), Some(&EffectValue::Float(20.0)));
    }

    #[test]
    fn test_retain_unresolved_in() {
        let token = |name: &str| UnresolvedToken {
            name: name.to_string(),
            hashed_key: hashed_key(name),
        };
        let mut outer = Resolution {
            resolved: vec![],
            unresolved: vec![token("A"), token("B")],
        };
        let inner = Resolution {
            resolved: vec!["A".to_string()],
            unresolved: vec![token("b")],
        };

        outer.retain_unresolved_in(&inner);
        assert_eq!(outer.unresolved, vec![token("B")]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let desc = Some("@Damage@ @Shield*2@ @Missing@");
        let effects = hashed(&[
            ("Damage", EffectValue::Integer(50)),
            ("Shield", EffectValue::Float(10.0)),
        ]);

        let once = resolve(desc, effects, Some("X"));
        let twice = resolve(desc, once.clone(), Some("X"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolve_keeps_unrelated_entries() {
        let mut effects = hashed(&[("Damage", EffectValue::Integer(50))]);
        effects.insert("Armor", 20);
        let out = resolve(Some("@Damage@"), effects, None);
        assert_eq!(out.get("armor"), Some(&EffectValue::Integer(20)));
        assert_eq!(out.len(), 2);
    }
}
