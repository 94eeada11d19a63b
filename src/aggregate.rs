//! Folder-level aggregation of per-file extraction results.
//!
//! The batch orchestrator concatenates each folder's extracted texts into
//! one block before handing it to the downstream summarization step. Only
//! the formatting lives here; folder listing, downloads, and uploads do
//! not.

use crate::extract::ExtractError;

/// Render the aggregate text block for one folder.
///
/// Each file appears as a `--- File: <name> ---` header followed by its
/// text; entries are joined by a blank line. A failed file contributes
/// its failure reason as its text, so one bad file never hides the rest
/// of the folder.
pub fn folder_report(entries: &[(String, Result<String, ExtractError>)]) -> String {
    entries
        .iter()
        .map(|(name, result)| {
            let text = match result {
                Ok(text) => text.clone(),
                Err(err) => err.to_string(),
            };
            format!("--- File: {} ---\n{}\n", name, text)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
