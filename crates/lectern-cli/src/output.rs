//! Output formatting for ranked results.
//!
//! Supports human-readable terminal output and JSON for scripting.

use lectern_core::search::RankedChunk;
use serde::Serialize;

/// Maximum characters shown in a content snippet.
const SNIPPET_MAX_LEN: usize = 200;

/// JSON output structure for a query run.
#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    id: u64,
    content: &'a str,
}

/// Formats ranked results as JSON.
pub fn format_json(query: &str, results: &[RankedChunk]) -> String {
    let output = JsonOutput {
        query,
        results: results
            .iter()
            .map(|r| JsonResult {
                id: r.id.as_u64(),
                content: &r.content,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Formats ranked results for terminal display.
pub fn format_human(query: &str, results: &[RankedChunk]) -> String {
    if results.is_empty() {
        return format!("No results found for \"{}\"", query);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Top {} chunk{} for \"{}\":\n\n",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        query
    ));

    for (i, result) in results.iter().enumerate() {
        output.push_str(&format!(
            "{}. [{}] {}\n",
            i + 1,
            result.id,
            truncate_text(&result.content, SNIPPET_MAX_LEN)
        ));
    }

    output.trim_end().to_string()
}

/// Truncates text at a word boundary, adding an ellipsis if needed.
fn truncate_text(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.len() <= max_len {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_len).collect();
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{}...", truncated),
    }
}
