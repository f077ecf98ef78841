//! Core domain models
//!
//! This module contains the fundamental types shared by the filter and the pruner:
//! - Semantic versions and the `HasVersion` seam
//! - Constraints and their range expressions
//! - Existing dependency records and upstream candidates

mod constraint;
mod dependency;
mod version;

pub use constraint::{Constraint, RangeExpr};
pub use dependency::{ExistingDependency, UpstreamCandidate};
pub use version::{HasVersion, SemanticVersion};
