use std::{borrow::Cow, path::Path};

use anyhow::Context;
use tracing::info;

use crate::core::model::Project;

pub const CSV_HEADER: [&str; 5] = ["id", "name", "updatedAt", "tables", "favorite"];

/// File name used when the dashboard exports without an explicit target.
pub const DEFAULT_CSV_FILE_NAME: &str = "projects.csv";

/// Renders `rows` as CSV: a header line followed by one line per project, joined by `\n`.
pub fn export_csv(rows: &[Project]) -> anyhow::Result<String> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for row in rows {
        let updated_at = row.updated_at_iso()?;
        lines.push(
            [
                escape_field(&row.id.to_string()),
                escape_field(&row.name),
                escape_field(&updated_at),
                Cow::Owned(row.tables.to_string()),
                Cow::Borrowed(if row.favorite { "true" } else { "false" }),
            ]
            .join(","),
        );
    }
    Ok(lines.join("\n"))
}

pub fn write_csv(path: impl AsRef<Path>, rows: &[Project]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let csv = export_csv(rows)?;
    std::fs::write(path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "exported projects");
    Ok(())
}

/// Quotes a field containing a comma, quote or line break, doubling inner quotes.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
