// src/io/reporting.rs

use crate::simulation::batch::BatchRun;
use crate::simulation::engine::HistoryRecord;
use crate::simulation::error::ReportError;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Writes the simulation history to a CSV file, one row per day.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The history records returned by the simulation engine.
pub fn write_simulation_log(file_path: impl AsRef<Path>, data: &[HistoryRecord]) -> Result<(), ReportError> {
    write_rows(file_path.as_ref(), data)
}

/// Writes one row per run of a batch.
pub fn write_batch_runs(file_path: impl AsRef<Path>, runs: &[BatchRun]) -> Result<(), ReportError> {
    write_rows(file_path.as_ref(), runs)
}

/// Serializes the history as CSV into any writer.
pub fn write_history_to<W: std::io::Write>(writer: W, data: &[HistoryRecord]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = rows.len(), path = %path.display(), "exported csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32) -> HistoryRecord {
        HistoryRecord {
            day,
            staff: 5,
            gross_productivity: 4.5,
            effort_rework: 0.5,
            effort_feature: 4.0,
            completed_work: 4.0 * day as f64,
            current_scope: 100.0,
            active_defects: 0.25,
            total_defects_generated: 0.5,
            cumulative_cost: 5.0 * day as f64,
        }
    }

    #[test]
    fn header_comes_from_field_names() {
        let mut buf = Vec::new();
        write_history_to(&mut buf, &[record(1), record(2)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "day,staff,gross_productivity,effort_rework,effort_feature,completed_work,\
                 current_scope,active_defects,total_defects_generated,cumulative_cost"
            )
        );
        assert_eq!(lines.next(), Some("1,5,4.5,0.5,4.0,4.0,100.0,0.25,0.5,5.0"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn writes_history_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        write_simulation_log(&path, &[record(1), record(2), record(3)]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 3);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("history.csv");
        assert!(write_simulation_log(&path, &[record(1)]).is_err());
    }
}
