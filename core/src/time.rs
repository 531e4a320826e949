use anyhow::{anyhow, Result};
use chrono::{NaiveDateTime, Timelike};

use crate::error::CommandError;

/// Pattern accepted from the command line, e.g. `15-03-2024 2359`.
pub const INPUT_FORMAT: &str = "%d-%m-%Y %H%M";
/// Pattern used when rendering a task, e.g. `Mar 15 2024 2359`.
pub const DISPLAY_FORMAT: &str = "%b %d %Y %H%M";

const ISO_MINUTES: &str = "%Y-%m-%dT%H:%M";
const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn parse_input_date(input: &str) -> Result<NaiveDateTime, CommandError> {
    let input = input.trim();
    NaiveDateTime::parse_from_str(input, INPUT_FORMAT)
        .map_err(|_| CommandError::UnparsableDate(input.to_string()))
}

pub fn format_display(date: &NaiveDateTime) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Machine form written to the data file.
///
/// Whole minutes are written as `yyyy-MM-ddTHH:mm`, which is what files from
/// earlier versions contain; anything finer keeps its seconds and fraction.
pub fn format_iso(date: &NaiveDateTime) -> String {
    if date.second() == 0 && date.nanosecond() == 0 {
        date.format(ISO_MINUTES).to_string()
    } else {
        date.format(ISO_SECONDS).to_string()
    }
}

pub fn parse_iso(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    NaiveDateTime::parse_from_str(input, ISO_SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(input, ISO_MINUTES))
        .map_err(|_| anyhow!("Could not parse stored date: '{}'", input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_parse_input_date() {
        assert_eq!(parse_input_date("15-03-2024 2359").unwrap(), at(2024, 3, 15, 23, 59));
        assert_eq!(parse_input_date(" 01-01-2025 0000 ").unwrap(), at(2025, 1, 1, 0, 0));
    }

    #[test]
    fn test_parse_input_date_rejects_other_formats() {
        // display and storage forms must not sneak through the input parser
        assert!(parse_input_date("Mar 15 2024 2359").is_err());
        assert!(parse_input_date("2024-03-15T23:59").is_err());
        assert!(parse_input_date("15-03-2024").is_err());
        assert!(parse_input_date("15-03-2024 2359 extra").is_err());
        assert!(parse_input_date("32-03-2024 1200").is_err());
        assert_eq!(
            parse_input_date("tomorrow"),
            Err(CommandError::UnparsableDate("tomorrow".to_string()))
        );
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(&at(2024, 3, 5, 9, 7)), "Mar 05 2024 0907");
        assert_eq!(format_display(&at(2024, 12, 25, 23, 59)), "Dec 25 2024 2359");
    }

    #[test]
    fn test_iso_forms() {
        let minutes = at(2024, 3, 15, 23, 59);
        assert_eq!(format_iso(&minutes), "2024-03-15T23:59");
        assert_eq!(parse_iso("2024-03-15T23:59").unwrap(), minutes);

        let precise = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_milli_opt(23, 59, 30, 250)
            .unwrap();
        assert_eq!(format_iso(&precise), "2024-03-15T23:59:30.250");
        assert_eq!(parse_iso(&format_iso(&precise)).unwrap(), precise);
        assert_eq!(parse_iso("2024-03-15T23:59:30").unwrap(), at(2024, 3, 15, 23, 59) + chrono::Duration::seconds(30));
    }

    #[test]
    fn test_parse_iso_rejects_display_form() {
        assert!(parse_iso("Mar 15 2024 2359").is_err());
        assert!(parse_iso("15-03-2024 2359").is_err());
    }
}
