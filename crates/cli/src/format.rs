//! Output formatting: human-readable or JSON.

use serde::Serialize;
use stratavec_primitives::{CollectionInfo, SearchResult};

/// Output mode for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

#[derive(Serialize)]
struct Hit<'a> {
    rank: usize,
    key: String,
    term: Option<&'a str>,
    category: Option<&'a str>,
    definition: Option<&'a str>,
    score: f32,
}

fn hits(results: &[SearchResult]) -> Vec<Hit<'_>> {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| Hit {
            rank: i + 1,
            key: r.key().to_string(),
            term: r.record.field("term").and_then(|v| v.as_str()),
            category: r.record.field("category").and_then(|v| v.as_str()),
            definition: r.record.field("definition").and_then(|v| v.as_str()),
            score: r.score,
        })
        .collect()
}

/// Format search results.
pub fn format_results(results: &[SearchResult], mode: OutputMode) -> String {
    let hits = hits(results);
    match mode {
        OutputMode::Json => to_json(&hits),
        OutputMode::Human if hits.is_empty() => "(no results)".to_string(),
        OutputMode::Human => hits
            .iter()
            .map(|h| {
                format!(
                    "{}) {:.4}  {} [{}]\n   {}",
                    h.rank,
                    h.score,
                    h.term.unwrap_or("-"),
                    h.category.unwrap_or("-"),
                    h.definition.unwrap_or("")
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format collection info.
pub fn format_info(info: &CollectionInfo, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(info),
        OutputMode::Human => {
            let schema = &info.schema;
            let mut lines = vec![
                format!("collection: {}", info.name),
                format!("records:    {}", info.count),
                format!("key:        {} ({})", schema.key().name, schema.key().key_type.name()),
            ];
            for field in schema.data_fields() {
                lines.push(format!(
                    "field:      {} ({}{})",
                    field.name,
                    field.field_type.name(),
                    if field.indexed { ", indexed" } else { "" }
                ));
            }
            for vector in schema.vector_fields() {
                lines.push(format!(
                    "vector:     {} ({} dims, {})",
                    vector.name,
                    vector.dimension,
                    vector.metric.name()
                ));
            }
            lines.join("\n")
        }
    }
}

/// Format an error message.
pub fn format_error(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&serde_json::json!({ "error": message })),
        OutputMode::Human => format!("(error) {}", message),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}
