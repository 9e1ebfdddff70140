//! Trajectory export (CSV/JSON).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use pokerlab_core::TrajectoryPoint;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `hours,profit,label` rows. The origin row has an empty label.
pub fn write_trajectory_csv<W: Write>(
    writer: W,
    points: &[TrajectoryPoint],
    decimals: usize,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["hours", "profit", "label"])?;
    for point in points {
        let label = point.label.map(|d| d.to_string()).unwrap_or_default();
        csv.write_record([
            format!("{:.*}", decimals, point.cumulative_hours),
            format!("{:.*}", decimals, point.cumulative_profit),
            label,
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_trajectory_csv_file(
    path: &Path,
    points: &[TrajectoryPoint],
    decimals: usize,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_trajectory_csv(file, points, decimals)
}

pub fn trajectory_json(points: &[TrajectoryPoint]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(points)?)
}
