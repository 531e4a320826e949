//! Line format of the data file.
//!
//! ```text
//! t,<description>,<done>
//! d,<description>,<done>,<due>
//! e,<description>,<done>,<start>,<end>
//! ```
//!
//! Fields are joined with a bare comma and nothing is escaped. Dates use the
//! ISO form from [`crate::time::format_iso`].

use anyhow::{anyhow, Context, Result};
use tracing::warn;

use crate::model::task::{Task, TaskKind};
use crate::time::{format_iso, parse_iso};

const SEPARATOR: &str = ",";

pub fn encode_task(task: &Task) -> String {
    let head = format!(
        "{}{sep}{}{sep}{}",
        task.kind().icon().to_ascii_lowercase(),
        task.description(),
        task.is_completed(),
        sep = SEPARATOR
    );
    match task.kind() {
        TaskKind::Todo => head,
        TaskKind::Deadline { due } => format!("{}{}{}", head, SEPARATOR, format_iso(due)),
        TaskKind::Event { start, end } => format!(
            "{}{sep}{}{sep}{}",
            head,
            format_iso(start),
            format_iso(end),
            sep = SEPARATOR
        ),
    }
}

pub fn decode_line(line: &str) -> Result<Task> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    let tag = fields[0];

    // number of fixed fields after the description
    let trailing = match tag {
        "d" => 2,
        "e" => 3,
        "t" => 1,
        other => {
            warn!("Unknown task tag '{}', reading the line as a todo", other);
            return decode_unknown(&fields);
        }
    };
    check_field_count(&fields, 2 + trailing)?;

    // whatever sits between the tag and the fixed tail is the description,
    // so commas typed into a description survive a round trip
    let tail = &fields[fields.len() - trailing..];
    let description = fields[1..fields.len() - trailing].join(SEPARATOR);
    let completed = parse_completed(tail[0]);

    let kind = match tag {
        "d" => TaskKind::Deadline {
            due: parse_iso(tail[1]).context("invalid due date")?,
        },
        "e" => TaskKind::Event {
            start: parse_iso(tail[1]).context("invalid start date")?,
            end: parse_iso(tail[2]).context("invalid end date")?,
        },
        _ => TaskKind::Todo,
    };

    Ok(Task::new(description, kind)?.with_completed(completed))
}

/// An unknown tag has no known tail, so only the description and completion
/// fields are read by position and anything after them is ignored.
fn decode_unknown(fields: &[&str]) -> Result<Task> {
    check_field_count(fields, 3)?;
    Ok(Task::todo(fields[1])?.with_completed(parse_completed(fields[2])))
}

fn check_field_count(fields: &[&str], expected: usize) -> Result<()> {
    if fields.len() < expected {
        return Err(anyhow!(
            "expected at least {} fields, found {}",
            expected,
            fields.len()
        ));
    }
    Ok(())
}

fn parse_completed(field: &str) -> bool {
    field.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let mut todo = Task::todo("Read book").unwrap();
        todo.mark();
        assert_eq!(encode_task(&todo), "t,Read book,true");

        let deadline = Task::deadline("Submit project", at(15, 23, 59)).unwrap();
        assert_eq!(encode_task(&deadline), "d,Submit project,false,2024-03-15T23:59");

        let event = Task::event("Team meeting", at(20, 10, 0), at(20, 11, 0)).unwrap();
        assert_eq!(
            encode_task(&event),
            "e,Team meeting,false,2024-03-20T10:00,2024-03-20T11:00"
        );
    }

    #[test]
    fn test_decode_existing_lines() {
        let task = decode_line("d,Return book,true,2024-03-15T18:00").unwrap();
        assert!(task.is_completed());
        assert_eq!(task.kind(), &TaskKind::Deadline { due: at(15, 18, 0) });

        let task = decode_line("e,Project sync,false,2024-03-20T10:00:00,2024-03-20T11:30").unwrap();
        assert_eq!(
            task.kind(),
            &TaskKind::Event { start: at(20, 10, 0), end: at(20, 11, 30) }
        );
    }

    #[test]
    fn test_completion_flag_is_lenient() {
        assert!(decode_line("t,a,TRUE").unwrap().is_completed());
        assert!(!decode_line("t,a,yes").unwrap().is_completed());
    }

    #[test]
    fn test_unknown_tag_reads_as_todo() {
        let task = decode_line("x,Mystery,true").unwrap();
        assert_eq!(task.kind(), &TaskKind::Todo);
        assert_eq!(task.description(), "Mystery");
        assert!(task.is_completed());
    }

    #[test]
    fn test_unknown_tag_ignores_extra_fields() {
        let task = decode_line("x,desc,true,2024-03-15T23:59").unwrap();
        assert_eq!(task.kind(), &TaskKind::Todo);
        assert_eq!(task.description(), "desc");
        assert!(task.is_completed());

        assert!(decode_line("x,desc").is_err());
    }

    #[test]
    fn test_description_with_commas_round_trips() {
        let task = Task::deadline("eggs, milk, bread", at(1, 9, 0)).unwrap();
        let decoded = decode_line(&encode_task(&task)).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn test_too_few_fields() {
        assert!(decode_line("t,lonely").is_err());
        assert!(decode_line("d,no date,false").is_err());
        assert!(decode_line("e,half,false,2024-03-20T10:00").is_err());
    }

    #[test]
    fn test_bad_dates_fail() {
        assert!(decode_line("d,x,false,Mar 15 2024 2359").is_err());
        assert!(decode_line("d,x,false,15-03-2024 2359").is_err());
        assert!(decode_line("e,x,false,2024-03-20T10:00,later").is_err());
    }
}
