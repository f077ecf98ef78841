//! Upstream version filtering
//!
//! Decides which upstream versions are new enough to build, one constraint
//! at a time, capping each constraint at its retained patch count.

use super::report::log_all_versions;
use crate::domain::{Constraint, HasVersion};

/// Returns the upstream versions worth building
///
/// For every constraint, a candidate survives when it satisfies the range and
/// is strictly newer than every existing version that satisfies the same
/// range. Survivors are sorted ascending and only the newest `patches` of them
/// are kept. Results are grouped by constraint, in constraint order; a version
/// matching several constraints appears once per constraint.
///
/// With no constraints at all, a candidate survives when it is strictly newer
/// than every existing version. When constraints exist, candidates matching
/// none of them are dropped.
///
/// `id` is only used to label log output.
pub fn filter_new_versions<U, E>(
    id: &str,
    upstream: &[U],
    constraints: &[Constraint],
    existing: &[E],
) -> Vec<U>
where
    U: HasVersion + Clone,
    E: HasVersion,
{
    let output: Vec<U> = if constraints.is_empty() {
        upstream
            .iter()
            .filter(|candidate| is_newer_than_all(*candidate, existing))
            .cloned()
            .collect()
    } else {
        constraints
            .iter()
            .flat_map(|constraint| filter_for_constraint(id, upstream, constraint, existing))
            .cloned()
            .collect()
    };

    log_all_versions(id, "as new versions", &output);
    output
}

/// Survivors for a single constraint, ascending
fn filter_for_constraint<'a, U, E>(
    id: &str,
    upstream: &'a [U],
    constraint: &Constraint,
    existing: &[E],
) -> Vec<&'a U>
where
    U: HasVersion,
    E: HasVersion,
{
    let candidates: Vec<&U> = upstream.iter().filter(|u| constraint.check(*u)).collect();
    if candidates.is_empty() {
        return Vec::new();
    }
    log_all_versions(
        id,
        &format!("for constraint {}", constraint.range()),
        &candidates,
    );

    let matched: Vec<&E> = existing.iter().filter(|e| constraint.check(*e)).collect();
    let mut survivors: Vec<&U> = candidates
        .into_iter()
        .filter(|candidate| is_newer_than_all(*candidate, &matched))
        .collect();
    if survivors.is_empty() {
        tracing::debug!(
            "no versions of {} for constraint {} are newer than existing dependencies",
            id,
            constraint.range()
        );
        return survivors;
    }

    survivors.sort_by(|a, b| a.version().cmp(b.version()));
    if constraint.patches() < survivors.len() {
        survivors.drain(..survivors.len() - constraint.patches());
    }

    let newest_existing = matched.iter().map(|e| e.version()).max();
    let description = match newest_existing {
        Some(newest) => format!(
            "newer than '{}' for constraint {}, after limiting for {} patches",
            newest,
            constraint.range(),
            constraint.patches()
        ),
        None => format!(
            "for constraint {}, after limiting for {} patches",
            constraint.range(),
            constraint.patches()
        ),
    };
    log_all_versions(id, &description, &survivors);

    survivors
}

/// True when the candidate is strictly greater than every existing version
fn is_newer_than_all<U: HasVersion, E: HasVersion>(candidate: &U, existing: &[E]) -> bool {
    existing
        .iter()
        .all(|e| candidate.version() > e.version())
}

/// Returns the versions that satisfy the constraints
///
/// Unlike `filter_new_versions`, there is no comparison with existing
/// dependencies and no patch cap. Input order is kept and a version is
/// repeated once for every constraint it satisfies. With no constraints the
/// input is returned unchanged.
pub fn filter_by_constraints<T>(versions: &[T], constraints: &[Constraint]) -> Vec<T>
where
    T: HasVersion + Clone,
{
    if constraints.is_empty() {
        return versions.to_vec();
    }

    versions
        .iter()
        .flat_map(|version| {
            constraints
                .iter()
                .filter(move |constraint| constraint.check(version))
                .map(move |_| version.clone())
        })
        .collect()
}
