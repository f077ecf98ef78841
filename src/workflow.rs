//! JSON output for CI workflows
//!
//! Workflow step outputs must be a single line, so values are encoded with
//! no whitespace outside of strings.

use serde::Serialize;

/// Encode a value as compact JSON
pub fn to_workflow_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}
