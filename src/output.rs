//! Printing edge lists

use crate::compact::CompactEdge;
use crate::config::OutputFormat;

/// Render edges as text lines or a JSON array
pub fn render_edges(edges: &[CompactEdge], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(edges
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(edges),
    }
}
