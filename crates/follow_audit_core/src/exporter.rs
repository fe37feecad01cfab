//! Text and CSV output for comparison and low-activity results.

use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::{comparator::Relationships, enricher::LowActivityRecord, errors::ExportError};

#[cfg(test)]
#[path = "exporter_tests.rs"]
mod tests;

const NOT_FOLLOWING_BACK_HEADING: &str = "Users you follow who DO NOT follow you back";
const FANS_HEADING: &str = "Users who FOLLOW YOU but you DO NOT follow back";
const DONE_LINE: &str = "--- Done ---";

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Txt => write!(f, "txt"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" => Ok(OutputFormat::Txt),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{other}', expected 'txt' or 'csv'")),
        }
    }
}

/// Renders both relationship sections.
///
/// Sets are iterated in lexicographic order, so the same input always renders
/// byte-identical output.
pub fn render_relationships(relationships: &Relationships, format: OutputFormat) -> String {
    match format {
        OutputFormat::Txt => {
            let mut out = String::new();
            push_text_section(
                &mut out,
                NOT_FOLLOWING_BACK_HEADING,
                relationships.non_followers.iter().map(|login| format!("- {login}")),
                relationships.non_followers.len(),
            );
            out.push('\n');
            push_text_section(
                &mut out,
                FANS_HEADING,
                relationships.fans.iter().map(|login| format!("- {login}")),
                relationships.fans.len(),
            );
            out.push('\n');
            out.push_str(DONE_LINE);
            out.push('\n');
            out
        }
        OutputFormat::Csv => {
            let mut out = String::from("Category,Username\n");
            let rows = relationships
                .non_followers
                .iter()
                .map(|login| ("not_following_back", login))
                .chain(relationships.fans.iter().map(|login| ("fan", login)));
            for (category, login) in rows {
                out.push_str(&format!("{category},{}\n", csv_field(login)));
            }
            out
        }
    }
}

/// Renders low-activity records, sorted by username.
pub fn render_low_activity(
    records: &[LowActivityRecord],
    threshold: u64,
    format: OutputFormat,
) -> String {
    let mut sorted: Vec<&LowActivityRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.username.cmp(&b.username));

    match format {
        OutputFormat::Txt => {
            let mut out = format!(
                "--- Users with {threshold} or fewer repositories ({}) ---\n\n",
                sorted.len()
            );
            if sorted.is_empty() {
                out.push_str("(none)\n");
            }
            for record in &sorted {
                out.push_str(&format!(
                    "- {} ({} repositories)\n",
                    record.username, record.repo_count
                ));
            }
            out.push('\n');
            out.push_str(DONE_LINE);
            out.push('\n');
            out
        }
        OutputFormat::Csv => {
            let mut out = String::from("Username,Public Repositories\n");
            for record in &sorted {
                out.push_str(&format!(
                    "{},{}\n",
                    csv_field(&record.username),
                    record.repo_count
                ));
            }
            out
        }
    }
}

/// Writes the comparison result to `destination`.
///
/// # Errors
/// Returns `ExportError::Io` if the file cannot be written.
#[instrument(skip(relationships))]
pub fn export_relationships(
    relationships: &Relationships,
    destination: &Path,
    format: OutputFormat,
) -> Result<(), ExportError> {
    write_output(destination, &render_relationships(relationships, format))
}

/// Writes low-activity records to `destination`.
///
/// # Errors
/// Returns `ExportError::Io` if the file cannot be written.
#[instrument(skip(records))]
pub fn export_low_activity(
    records: &[LowActivityRecord],
    threshold: u64,
    destination: &Path,
    format: OutputFormat,
) -> Result<(), ExportError> {
    write_output(destination, &render_low_activity(records, threshold, format))
}

fn write_output(destination: &Path, contents: &str) -> Result<(), ExportError> {
    fs::write(destination, contents).map_err(|source| {
        error!(path = %destination.display(), error = %source, "Failed to write results");
        ExportError::Io {
            path: destination.to_path_buf(),
            source,
        }
    })?;

    info!(path = %destination.display(), bytes = contents.len(), "Results written");
    Ok(())
}

fn push_text_section<I>(out: &mut String, heading: &str, lines: I, count: usize)
where
    I: Iterator<Item = String>,
{
    out.push_str(&format!("--- {heading} ({count}) ---\n"));
    if count == 0 {
        out.push_str("(none)\n");
    }
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Quotes a CSV field when it contains a separator, quote or line break.
pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
