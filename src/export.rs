use std::fs;
use std::io;
use std::path::Path;

use stopwatch_core::{format_clock, LapEntry};

const HEADER: [&str; 5] = [
    "Lap #",
    "Lap (ms)",
    "Lap (formatted)",
    "Total (ms)",
    "Total (formatted)",
];

/// Quote a field only when it contains a comma, quote, or newline;
/// embedded quotes are doubled.
fn csv_field(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('"') || escaped.contains('\n') {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize the ledger: header row plus one row per lap, oldest first.
/// Rows are newline-separated with no trailing newline.
pub fn laps_to_csv(entries: &[LapEntry]) -> String {
    let mut rows = Vec::with_capacity(entries.len() + 1);
    rows.push(csv_row(&HEADER.map(String::from)));
    for entry in entries {
        rows.push(csv_row(&[
            entry.index.to_string(),
            entry.lap_ms.to_string(),
            format_clock(entry.lap_ms),
            entry.total_ms.to_string(),
            format_clock(entry.total_ms as i64),
        ]));
    }
    rows.join("\n")
}

/// Write the ledger to `path` as CSV. An empty ledger is a no-op: no file
/// is touched.
pub fn export_csv<P: AsRef<Path>>(path: P, entries: &[LapEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    fs::write(path, laps_to_csv(entries))
}
