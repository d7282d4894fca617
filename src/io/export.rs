//! CSV export for retained grid history.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::history::HistoryPoint;

/// Column header for history export.
const HEADER: [&str; 4] = ["timestamp_ms", "generation_mw", "consumption_mw", "net_mw"];

/// Exports history points to a CSV file at the given path.
///
/// Writes a header row followed by one row per point, oldest first.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_history_csv<'a>(
    points: impl IntoIterator<Item = &'a HistoryPoint>,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(points, buf)
}

/// Writes history points as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv<'a>(
    points: impl IntoIterator<Item = &'a HistoryPoint>,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;

    for p in points {
        wtr.write_record(&[
            p.timestamp_ms.to_string(),
            format!("{:.1}", p.generation),
            format!("{:.1}", p.consumption),
            format!("{:.1}", p.net),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(t: u64) -> HistoryPoint {
        HistoryPoint {
            timestamp_ms: t * 3000,
            generation: 77.0,
            consumption: 83.0,
            net: 6.0,
        }
    }

    fn render(points: &[HistoryPoint]) -> String {
        let mut buf = Vec::new();
        write_csv(points, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_first_row() {
        let out = render(&[point(1)]);
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp_ms,generation_mw,consumption_mw,net_mw")
        );
        assert_eq!(lines.next(), Some("3000,77.0,83.0,6.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn row_count_matches_points() {
        let points: Vec<HistoryPoint> = (1..=20).map(point).collect();
        assert_eq!(render(&points).lines().count(), 21);
    }

    #[test]
    fn empty_history_writes_header_only() {
        assert_eq!(render(&[]).lines().count(), 1);
    }

    #[test]
    fn output_is_deterministic() {
        let points: Vec<HistoryPoint> = (1..=5).map(point).collect();
        assert_eq!(render(&points), render(&points));
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "vpp_dashboard_export_{}.csv",
            std::process::id()
        ));
        export_history_csv(&[point(1), point(2)], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(content.lines().count(), 3);
    }
}
