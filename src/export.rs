use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::stats::StatsTable;

#[derive(Debug, Serialize)]
struct SeriesRow {
    difficulty: String,
    #[serde(rename = "Max")]
    max: f64,
    #[serde(rename = "Avg")]
    avg: f64,
    runs: usize,
}

/// Write one CSV row per key, in ascending key order.
pub fn write_csv<W: Write>(table: &StatsTable, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for (key, entry) in table.iter() {
        writer.serialize(SeriesRow {
            difficulty: key.to_string(),
            max: entry.max,
            avg: entry.avg,
            runs: entry.samples.len(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Shortest representation that reads back to the same value
fn format_value(value: f64) -> String {
    format!("{}", value)
}

/// Plain text table of the plotted series; the spread column shows the
/// lowest and highest per-run average when the input carried them.
pub fn write_table<W: Write>(table: &StatsTable, mut out: W) -> Result<()> {
    writeln!(out, "{:>10} {:>12} {:>12} {:>6}  spread", "difficulty", "Max", "Avg", "runs")?;
    for (key, entry) in table.iter() {
        let spread = entry
            .sample_range()
            .map(|(lo, hi)| format!("{}..{}", format_value(lo), format_value(hi)))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>10} {:>12} {:>12} {:>6}  {}",
            key.to_string(),
            format_value(entry.max),
            format_value(entry.avg),
            entry.samples.len(),
            spread
        )?;
    }
    Ok(())
}
