use chrono::NaiveDateTime;

use crate::error::{CommandError, DEADLINE_USAGE, EVENT_USAGE};
use crate::time::parse_input_date;

pub const BY_FLAG: &str = "/by";
pub const FROM_FLAG: &str = "/from";
pub const TO_FLAG: &str = "/to";

/// A fully validated command line. Task numbers are kept exactly as the user
/// typed them (1-based); checking them against the list is left to the
/// caller, which knows its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bye,
    List,
    Help,
    Reminder,
    Find(String),
    Mark(i64),
    Unmark(i64),
    Delete(i64),
    Todo(String),
    Deadline {
        description: String,
        due: NaiveDateTime,
    },
    Event {
        description: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Command {
    /// Whether a successful run of this command changes the task list.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Mark(_)
                | Command::Unmark(_)
                | Command::Delete(_)
                | Command::Todo(_)
                | Command::Deadline { .. }
                | Command::Event { .. }
        )
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = tokens.split_first() else {
        return Err(CommandError::EmptyInput);
    };

    match command {
        "bye" => no_args(args, "bye", Command::Bye),
        "list" => no_args(args, "list", Command::List),
        "help" => no_args(args, "help", Command::Help),
        "reminder" => no_args(args, "reminder", Command::Reminder),
        "find" => match args {
            [] => Err(CommandError::MissingKeyword),
            [keyword] => Ok(Command::Find(keyword.to_string())),
            _ => Err(CommandError::WrongArity {
                command: "find",
                usage: "find <keyword>",
            }),
        },
        "mark" => task_number(args, "mark", "mark <task number>").map(Command::Mark),
        "unmark" => task_number(args, "unmark", "unmark <task number>").map(Command::Unmark),
        "delete" => task_number(args, "delete", "delete <task number>").map(Command::Delete),
        "todo" => {
            if args.is_empty() {
                return Err(CommandError::EmptyDescription("todo"));
            }
            Ok(Command::Todo(args.join(" ")))
        }
        "deadline" => parse_deadline(args),
        "event" => parse_event(args),
        other => Err(CommandError::UnrecognizedCommand(other.to_string())),
    }
}

fn no_args(args: &[&str], command: &'static str, parsed: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::WrongArity {
            command,
            usage: command,
        })
    }
}

fn task_number(args: &[&str], command: &'static str, usage: &'static str) -> Result<i64, CommandError> {
    match args {
        [number] => number
            .parse::<i64>()
            .map_err(|_| CommandError::InvalidTaskNumber(number.to_string())),
        _ => Err(CommandError::WrongArity { command, usage }),
    }
}

/// Splits at the first token equal to `flag`. Flags are not escapable: a
/// flag word inside a description always starts the next segment.
fn split_at_flag<'a, 'b>(tokens: &'a [&'b str], flag: &str) -> Option<(&'a [&'b str], &'a [&'b str])> {
    let position = tokens.iter().position(|token| *token == flag)?;
    Some((&tokens[..position], &tokens[position + 1..]))
}

fn parse_deadline(args: &[&str]) -> Result<Command, CommandError> {
    if args.is_empty() {
        return Err(CommandError::EmptyDescription("deadline"));
    }
    let (description, due) = split_at_flag(args, BY_FLAG).ok_or(CommandError::MissingDateFlag {
        flag: BY_FLAG,
        usage: DEADLINE_USAGE,
    })?;
    if description.is_empty() {
        return Err(CommandError::EmptyDescription("deadline"));
    }
    if due.is_empty() {
        return Err(CommandError::MissingDate {
            flag: BY_FLAG,
            usage: DEADLINE_USAGE,
        });
    }

    Ok(Command::Deadline {
        description: description.join(" "),
        due: parse_input_date(&due.join(" "))?,
    })
}

fn parse_event(args: &[&str]) -> Result<Command, CommandError> {
    if args.is_empty() {
        return Err(CommandError::EmptyDescription("event"));
    }
    let (description, rest) = split_at_flag(args, FROM_FLAG).ok_or(CommandError::MissingDateFlag {
        flag: FROM_FLAG,
        usage: EVENT_USAGE,
    })?;
    // the first /to after /from always closes the start segment
    let (start, end) = split_at_flag(rest, TO_FLAG).ok_or(CommandError::MissingDateFlag {
        flag: TO_FLAG,
        usage: EVENT_USAGE,
    })?;
    if description.is_empty() {
        return Err(CommandError::EmptyDescription("event"));
    }
    for (segment, flag) in [(start, FROM_FLAG), (end, TO_FLAG)] {
        if segment.is_empty() {
            return Err(CommandError::MissingDate {
                flag,
                usage: EVENT_USAGE,
            });
        }
    }

    Ok(Command::Event {
        description: description.join(" "),
        start: parse_input_date(&start.join(" "))?,
        end: parse_input_date(&end.join(" "))?,
    })
}
