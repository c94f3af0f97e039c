//! Record file output.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

use super::{Record, Slot};
use crate::error::Result;
use crate::models::{DATE_FORMAT, TOKEN_HOLIDAY};

fn slot_text(slot: &Slot) -> String {
    match slot {
        Slot::Person(p) => p.to_string(),
        Slot::Holiday => TOKEN_HOLIDAY.to_string(),
    }
}

/// Renders rows as aligned text, preceded by a `#` header line.
///
/// The output parses back into the same rows.
pub fn render_records(records: &[Record]) -> String {
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.week.to_string(),
                r.date.format(DATE_FORMAT).to_string(),
                slot_text(&r.first),
                slot_text(&r.second),
            ]
        })
        .collect();

    let header = ["# Week", "Date", "Person1", "Person2"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<w0$}  {:<w1$}  {:<w2$}  {}",
        header[0],
        header[1],
        header[2],
        header[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    for [week, date, first, second] in &rows {
        let _ = writeln!(
            out,
            "{:>w0$}  {:<w1$}  {:<w2$}  {}",
            week,
            date,
            first,
            second,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
    }
    out
}

/// Writes rows to `path`, replacing any existing file.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    fs::write(path, render_records(records))?;
    info!(path = %path.display(), rows = records.len(), "records saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_records;
    use crate::models::ParticipantRef;
    use chrono::NaiveDate;

    fn sample() -> Vec<Record> {
        vec![
            Record {
                week: 2,
                date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
                first: Slot::Person("Annika".into()),
                second: Slot::Person("Bo".into()),
            },
            Record {
                week: 3,
                date: NaiveDate::from_ymd_opt(2024, 1, 19).unwrap(),
                first: Slot::Holiday,
                second: Slot::Holiday,
            },
            Record {
                week: 4,
                date: NaiveDate::from_ymd_opt(2024, 1, 26).unwrap(),
                first: Slot::Person("Cy".into()),
                second: Slot::Person(ParticipantRef::Nobody),
            },
        ]
    }

    #[test]
    fn test_render_layout() {
        let text = render_records(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# Week"));
        assert!(lines[2].contains("HOLIDAY"));
        assert!(lines[3].trim_end().ends_with("nan"));
    }

    #[test]
    fn test_render_parses_back() {
        let records = sample();
        let back = parse_records(&render_records(&records)).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_write_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.txt");
        write_records(&path, &sample()).unwrap();
        let back = crate::io::load_records(&path).unwrap();
        assert_eq!(back, sample());
    }
}
