use crate::core::model::ProjectSnapshot;
use anyhow::{Context, Result};

/// Serializes the full snapshot as pretty-printed JSON.
pub fn export_json(snapshot: &ProjectSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot)
        .with_context(|| format!("Failed to serialize project: {}", snapshot.key))
}
