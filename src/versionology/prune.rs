//! Retention pruning of declared dependencies
//!
//! Pruning works on distinct version values, not individual records: a kept
//! version keeps every record built for it, whatever its targets.

use crate::domain::{Constraint, ExistingDependency, SemanticVersion};
use std::collections::BTreeSet;

/// Returns the records to keep under the given retention constraints
///
/// For each constraint, the distinct versions of records with the same id
/// that satisfy the range are sorted and capped at the newest `patches`.
/// Every record whose version lands in the union of those sets is kept.
///
/// The result is sorted by id, then version, then number of targets, and the
/// targets of every record are sorted.
pub fn prune_dependencies(
    existing: &[ExistingDependency],
    constraints: &[Constraint],
) -> Vec<ExistingDependency> {
    prune_indices(existing, constraints)
        .into_iter()
        .map(|i| {
            let mut dependency = existing[i].clone();
            dependency.targets.sort();
            dependency
        })
        .collect()
}

/// Positions of the records to keep, in output order
///
/// Shared with the configuration model so that string-level records can be
/// pruned without losing their extra fields.
pub(crate) fn prune_indices(
    existing: &[ExistingDependency],
    constraints: &[Constraint],
) -> Vec<usize> {
    let mut keep: BTreeSet<&SemanticVersion> = BTreeSet::new();

    for constraint in constraints {
        let versions: BTreeSet<&SemanticVersion> = existing
            .iter()
            .filter(|d| d.id == constraint.id() && constraint.check(*d))
            .map(|d| &d.version)
            .collect();

        let skip = versions.len().saturating_sub(constraint.patches());
        tracing::debug!(
            "constraint {} for {} retains {} of {} versions",
            constraint.range(),
            constraint.id(),
            versions.len() - skip,
            versions.len()
        );
        keep.extend(versions.into_iter().skip(skip));
    }

    let mut indices: Vec<usize> = (0..existing.len())
        .filter(|&i| keep.contains(&existing[i].version))
        .collect();
    indices.sort_by(|&a, &b| {
        let (a, b) = (&existing[a], &existing[b]);
        a.id.cmp(&b.id)
            .then_with(|| a.version.cmp(&b.version))
            .then_with(|| a.targets.len().cmp(&b.targets.len()))
    });
    indices
}
