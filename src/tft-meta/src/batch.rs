//! Batch refinement with per-entity failure isolation
//!
//! Every entity owns its own effects map, so a batch is refined in parallel.
//! A structurally unusable entity is dropped and recorded; the rest of the
//! batch still comes through in input order.

use crate::document::EntityKind;
use crate::resolve::Resolution;
use crate::{Error, Result};
use rayon::prelude::*;
use serde_json::Value;

/// An entity that could not be refined
#[derive(Debug)]
pub struct Failure {
    pub kind: EntityKind,
    /// Position within its batch
    pub index: usize,
    pub error: Error,
}

/// Counters for one or more batches
#[derive(Debug, Default)]
pub struct BatchReport {
    pub refined: usize,
    /// Description tokens left unresolved across all refined entities
    pub unresolved_tokens: usize,
    pub failures: Vec<Failure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.refined += other.refined;
        self.unresolved_tokens += other.unresolved_tokens;
        self.failures.extend(other.failures);
    }

    pub(crate) fn record_failure(&mut self, kind: EntityKind, index: usize, error: Error) {
        tracing::warn!("Skipping {} #{}: {}", kind, index, error);
        self.failures.push(Failure { kind, index, error });
    }
}

/// Refine every document with `refine`, in parallel, preserving order
pub fn refine_batch<T, F>(kind: EntityKind, docs: &[Value], refine: F) -> (Vec<T>, BatchReport)
where
    T: Send,
    F: Fn(&Value) -> Result<(T, Resolution)> + Sync,
{
    let results: Vec<Result<(T, Resolution)>> = docs.par_iter().map(&refine).collect();

    let mut report = BatchReport::default();
    let mut entities = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok((entity, resolution)) => {
                report.refined += 1;
                report.unresolved_tokens += resolution.unresolved.len();
                entities.push(entity);
            }
            Err(error) => report.record_failure(kind, index, error),
        }
    }

    (entities, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::UnresolvedToken;
    use serde_json::json;

    fn refine_number(doc: &Value) -> Result<(i64, Resolution)> {
        match doc.as_i64() {
            Some(n) if n >= 0 => Ok((n, Resolution::default())),
            Some(_) => Ok((
                0,
                Resolution {
                    resolved: vec![],
                    unresolved: vec![UnresolvedToken {
                        name: "Neg".to_string(),
                        hashed_key: crate::hashed_key("Neg"),
                    }],
                },
            )),
            None => Err(Error::MalformedInput {
                kind: EntityKind::Item,
                found: "string",
            }),
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let docs: Vec<Value> = (0..100).map(|n| json!(n)).collect();
        let (out, report) = refine_batch(EntityKind::Item, &docs, refine_number);

        assert_eq!(out, (0..100).collect::<Vec<i64>>());
        assert_eq!(report.refined, 100);
        assert!(report.is_clean());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let docs = vec![json!(1), json!("bad"), json!(3), json!(-1)];
        let (out, report) = refine_batch(EntityKind::Item, &docs, refine_number);

        assert_eq!(out, vec![1, 3, 0]);
        assert_eq!(report.refined, 3);
        assert_eq!(report.unresolved_tokens, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].kind, EntityKind::Item);
    }

    #[test]
    fn test_report_merge() {
        let mut a = BatchReport {
            refined: 2,
            unresolved_tokens: 1,
            failures: vec![],
        };
        let mut b = BatchReport::default();
        b.refined = 1;
        b.record_failure(
            EntityKind::Trait,
            4,
            Error::MalformedInput {
                kind: EntityKind::Trait,
                found: "null",
            },
        );

        a.merge(b);
        assert_eq!(a.refined, 3);
        assert_eq!(a.unresolved_tokens, 1);
        assert!(!a.is_clean());
    }
}
