use thiserror::Error;

pub const DEADLINE_USAGE: &str = "deadline <task> /by <dd-MM-yyyy HHmm>";
pub const EVENT_USAGE: &str = "event <task> /from <dd-MM-yyyy HHmm> /to <dd-MM-yyyy HHmm>";

/// Errors a user can fix by re-issuing a corrected command.
///
/// None of these ever leave the interpreter: they are rendered into the
/// response text and the task list is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("This is an empty input! Please enter a command.")]
    EmptyInput,

    #[error("I don't recognize '{0}'. Type 'help' to see the available commands.")]
    UnrecognizedCommand(String),

    #[error("Wrong number of arguments for '{command}'. Usage: {usage}")]
    WrongArity {
        command: &'static str,
        usage: &'static str,
    },

    #[error("The description of a {0} cannot be empty!")]
    EmptyDescription(&'static str),

    #[error("Missing '{flag}'. Usage: {usage}")]
    MissingDateFlag {
        flag: &'static str,
        usage: &'static str,
    },

    #[error("Missing date after '{flag}'. Usage: {usage}")]
    MissingDate {
        flag: &'static str,
        usage: &'static str,
    },

    #[error("'{0}' is not a valid date. Please use the format dd-MM-yyyy HHmm (e.g. 15-10-2019 1400).")]
    UnparsableDate(String),

    #[error("'{0}' is not a valid task number.")]
    InvalidTaskNumber(String),

    #[error("Task number {number} is out of range! You have {size} task(s) in the list.")]
    IndexOutOfRange { number: i64, size: usize },

    #[error("Please provide a keyword to search for: find <keyword>")]
    MissingKeyword,
}
