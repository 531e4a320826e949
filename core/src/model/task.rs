use std::fmt;

use chrono::NaiveDateTime;

use crate::error::CommandError;
use crate::time::format_display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { due: NaiveDateTime },
    // start may come after end; only parseability is checked
    Event { start: NaiveDateTime, end: NaiveDateTime },
}

impl TaskKind {
    /// Single-letter tag shared by the list display and the data file.
    pub fn icon(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Todo => "todo",
            TaskKind::Deadline { .. } => "deadline",
            TaskKind::Event { .. } => "event",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    completed: bool,
    kind: TaskKind,
}

impl Task {
    pub fn new(description: impl Into<String>, kind: TaskKind) -> Result<Self, CommandError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(CommandError::EmptyDescription(kind.name()));
        }
        Ok(Self {
            description,
            completed: false,
            kind,
        })
    }

    pub fn todo(description: impl Into<String>) -> Result<Self, CommandError> {
        Self::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, due: NaiveDateTime) -> Result<Self, CommandError> {
        Self::new(description, TaskKind::Deadline { due })
    }

    pub fn event(
        description: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, CommandError> {
        Self::new(description, TaskKind::Event { start, end })
    }

    /// Builder used when restoring a task whose completion state is stored.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn mark(&mut self) {
        self.completed = true;
    }

    pub fn unmark(&mut self) {
        self.completed = false;
    }

    /// The date a reminder is measured against: the due date of a deadline,
    /// the end of an event. Todos have none.
    pub fn relevant_date(&self) -> Option<NaiveDateTime> {
        match self.kind {
            TaskKind::Todo => None,
            TaskKind::Deadline { due } => Some(due),
            TaskKind::Event { end, .. } => Some(end),
        }
    }

    /// Whole-word, case-sensitive match against the description.
    pub fn matches_word(&self, keyword: &str) -> bool {
        self.description.split_whitespace().any(|word| word == keyword)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.kind.icon(), status, self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { due } => write!(f, "(by: {})", format_display(due)),
            TaskKind::Event { start, end } => write!(
                f,
                "(from: {} to: {})",
                format_display(start),
                format_display(end)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_display_todo() {
        let mut task = Task::todo("Read book").unwrap();
        assert_eq!(task.to_string(), "[T][ ] Read book");
        task.mark();
        assert_eq!(task.to_string(), "[T][X] Read book");
    }

    #[test]
    fn test_display_deadline() {
        let task = Task::deadline("Submit project", at(15, 18)).unwrap();
        assert_eq!(task.to_string(), "[D][ ] Submit project(by: Feb 15 2024 1800)");
    }

    #[test]
    fn test_display_event() {
        let task = Task::event("Team meeting", at(20, 10), at(20, 11)).unwrap();
        assert_eq!(
            task.to_string(),
            "[E][ ] Team meeting(from: Feb 20 2024 1000 to: Feb 20 2024 1100)"
        );
    }

    #[test]
    fn test_empty_description_rejected() {
        assert_eq!(Task::todo("   "), Err(CommandError::EmptyDescription("todo")));
        assert_eq!(
            Task::deadline("", at(1, 0)),
            Err(CommandError::EmptyDescription("deadline"))
        );
    }

    #[test]
    fn test_event_end_before_start_is_kept() {
        let task = Task::event("Backwards", at(20, 11), at(20, 10)).unwrap();
        assert_eq!(task.relevant_date(), Some(at(20, 10)));
    }

    #[test]
    fn test_mark_unmark_round_trip() {
        let original = Task::deadline("Pay rent", at(1, 9)).unwrap();
        let mut task = original.clone();
        task.mark();
        assert!(task.is_completed());
        task.unmark();
        assert_eq!(task, original);
    }

    #[test]
    fn test_matches_word() {
        let task = Task::todo("Buy groceries today").unwrap();
        assert!(task.matches_word("groceries"));
        assert!(!task.matches_word("Groceries"));
        assert!(!task.matches_word("grocer"));
        assert!(!Task::todo("groceriesx").unwrap().matches_word("groceries"));
    }
}
