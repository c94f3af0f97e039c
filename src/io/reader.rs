//! Record file parsing.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{Record, Slot};
use crate::error::{Result, RotaError};
use crate::models::{validate_identifier, ParticipantRef, DATE_FORMAT, TOKEN_HOLIDAY};

/// Reads and parses a record file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)?;
    let records = parse_records(&text)?;
    debug!(path = %path.display(), rows = records.len(), "records loaded");
    Ok(records)
}

/// Parses record text.
///
/// # Errors
/// `Parse` with the 1-based line number for a wrong field count, a bad
/// week number or date, or a malformed participant identifier.
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default();
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let [week, date, first, second] = fields.as_slice() else {
            return Err(RotaError::parse(
                line,
                format!("expected 4 fields, got {}", fields.len()),
            ));
        };

        let week = week
            .parse()
            .map_err(|_| RotaError::parse(line, format!("invalid week number {week:?}")))?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| RotaError::parse(line, format!("invalid date {date:?}: {e}")))?;

        records.push(Record {
            week,
            date,
            first: parse_slot(first, line)?,
            second: parse_slot(second, line)?,
        });
    }
    Ok(records)
}

fn parse_slot(field: &str, line: usize) -> Result<Slot> {
    if field.eq_ignore_ascii_case(TOKEN_HOLIDAY) {
        return Ok(Slot::Holiday);
    }
    if field.eq_ignore_ascii_case("nan") || field.eq_ignore_ascii_case("none") {
        return Ok(Slot::Person(ParticipantRef::Nobody));
    }
    validate_identifier(field).map_err(|e| RotaError::parse(line, e.to_string()))?;
    Ok(Slot::Person(ParticipantRef::participant(field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Week  Date        Person1  Person2
  2     12/01/2024  Ann      Bo
  3     19/01/2024  HOLIDAY  HOLIDAY   # sports day

  4     26/01/2024  Cy       NaN
";

    #[test]
    fn test_parse_sample() {
        let records = parse_records(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].week, 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        assert_eq!(records[0].first, Slot::Person("Ann".into()));
        assert!(records[1].is_holiday());
        assert_eq!(records[2].second, Slot::Person(ParticipantRef::Nobody));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_records("1 05/01/2024 Ann\n").unwrap_err();
        assert!(matches!(err, RotaError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_bad_date_and_week() {
        let err = parse_records("\n1 2024-01-05 Ann Bo\n").unwrap_err();
        assert!(matches!(err, RotaError::Parse { line: 2, .. }));
        let err = parse_records("one 05/01/2024 Ann Bo\n").unwrap_err();
        assert!(matches!(err, RotaError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_records("# nothing yet\n\n").unwrap().is_empty());
    }
}
