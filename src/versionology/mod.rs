//! Version selection algorithms
//!
//! - `filter_new_versions`: which upstream versions are new enough to build
//! - `filter_by_constraints`: which versions satisfy any constraint
//! - `prune_dependencies`: which declared dependencies to retain
//! - `format_versions` / `log_all_versions`: version tables for log output

mod filter;
mod prune;
mod report;

pub use filter::{filter_by_constraints, filter_new_versions};
pub(crate) use prune::prune_indices;
pub use prune::prune_dependencies;
pub use report::{format_versions, log_all_versions};
