//! JSON reporter

use anyhow::Result;
use serde::Serialize;

/// Render any report as pretty-printed JSON
pub fn render<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
