//! Work order identifiers derived from the issue date and the generation time.
//!
//! The sequence fragment is the last four digits of the millisecond timestamp,
//! so two orders of the same year whose timestamps differ by a multiple of 10 s
//! get the same number. The audit log's unique constraint on `ot_number` is
//! what detects it.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::Serialize;
use utoipa::ToSchema;

pub const OT_PREFIX: &str = "OT-";
const ISSUE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Identifiers of one generated work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OtIdentifiers {
    /// `OT-<year>-<4 digits>`
    pub ot_number: String,
    /// Case file reference: the full millisecond timestamp.
    pub expediente: String,
    /// Document-control code, `RTL-01/Ed02-<year>/LAB`.
    pub codigo_doc: String,
    #[serde(skip)]
    pub year: i32,
}

impl OtIdentifiers {
    /// Derive the identifiers for a record issued on `issue_date` and generated at `now`.
    ///
    /// An absent or malformed issue date falls back to the year of `now`.
    pub fn derive<Tz: TimeZone>(issue_date: Option<&str>, now: &DateTime<Tz>) -> Self {
        let year = issue_date.and_then(parse_issue_year).unwrap_or_else(|| now.year());

        let timestamp = now.timestamp_millis().max(0);
        let expediente = timestamp.to_string();
        let seq = format!("{:04}", timestamp % 10_000);

        Self {
            ot_number: format!("{}{}-{}", OT_PREFIX, year, seq),
            expediente,
            codigo_doc: format!("RTL-01/Ed02-{}/LAB", year),
            year,
        }
    }

    /// Sequence fragment (the last four digits of `ot_number`).
    pub fn sequence(&self) -> &str {
        let len = self.ot_number.len();
        &self.ot_number[len.saturating_sub(4)..]
    }
}

/// Year component of a `DD/MM/YYYY` date.
pub fn parse_issue_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), ISSUE_DATE_FORMAT)
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};

    fn fixed_now() -> DateTime<Utc> {
        // 2025-06-01T12:00:00.123Z
        Utc.timestamp_millis_opt(1_748_779_200_123).unwrap()
    }

    #[test]
    fn test_year_from_issue_date() {
        let ids = OtIdentifiers::derive(Some("15/03/2026"), &fixed_now());
        assert_eq!(ids.year, 2026);
        assert!(ids.ot_number.starts_with("OT-2026-"));
        assert_eq!(ids.codigo_doc, "RTL-01/Ed02-2026/LAB");
    }

    #[test]
    fn test_sequence_is_last_four_timestamp_digits() {
        let ids = OtIdentifiers::derive(Some("15/03/2026"), &fixed_now());
        assert_eq!(ids.expediente, "1748779200123");
        assert_eq!(ids.ot_number, "OT-2026-0123");
        assert_eq!(ids.sequence(), "0123");
    }

    #[test]
    fn test_missing_or_malformed_date_uses_current_year() {
        let now = fixed_now();
        assert_eq!(OtIdentifiers::derive(None, &now).year, 2025);
        assert_eq!(OtIdentifiers::derive(Some("2026-03-15"), &now).year, 2025);
        assert_eq!(OtIdentifiers::derive(Some("32/13/2026"), &now).year, 2025);
    }

    #[test]
    fn test_ot_number_pattern_with_local_clock() {
        let ids = OtIdentifiers::derive(Some("01/12/2024"), &Local::now());
        let parts: Vec<&str> = ids.ot_number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "OT");
        assert_eq!(parts[1], "2024");
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        assert!(ids.expediente.ends_with(parts[2]));
    }
}
