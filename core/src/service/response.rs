/// What a front end gets back for one line of input.
///
/// `should_exit` is only ever set by `bye`; front ends decide for themselves
/// how to shut down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    pub should_exit: bool,
    pub is_error: bool,
}

impl Response {
    pub fn reply(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            should_exit: false,
            is_error: false,
        }
    }

    pub fn exit(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            should_exit: true,
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            should_exit: false,
            is_error: true,
        }
    }
}

pub const HELP_TEXT: &str = "\
Here are the commands I understand:
  todo <task>
  deadline <task> /by <dd-MM-yyyy HHmm>
  event <task> /from <dd-MM-yyyy HHmm> /to <dd-MM-yyyy HHmm>
  list
  find <keyword>
  reminder
  mark <task number>
  unmark <task number>
  delete <task number>
  help
  bye
The words /by, /from and /to cannot be part of a task description:
the first one typed always starts the date.";

pub(crate) fn count_line(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {} {} in the list.", count, noun)
}
