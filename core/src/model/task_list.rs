use chrono::{NaiveDateTime, TimeDelta};

use crate::error::CommandError;
use crate::model::task::Task;

/// Ordered, position-addressed collection of tasks.
///
/// Positions are 0-based here; the interpreter adds one when talking to the
/// user. They shift down after every removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn remove(&mut self, index: usize) -> Result<Task, CommandError> {
        self.check_bounds(index)?;
        Ok(self.tasks.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&Task, CommandError> {
        self.check_bounds(index)?;
        Ok(&self.tasks[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task, CommandError> {
        self.check_bounds(index)?;
        Ok(&mut self.tasks[index])
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Open tasks whose deadline (or event end) lies in
    /// `[reference, reference + days]`, both ends included. A window reaching
    /// past the calendar's range is clamped to its edge.
    pub fn upcoming_within(&self, days: i64, reference: NaiveDateTime) -> Vec<(usize, &Task)> {
        let horizon = TimeDelta::try_days(days)
            .and_then(|window| reference.checked_add_signed(window))
            .unwrap_or(if days < 0 { NaiveDateTime::MIN } else { NaiveDateTime::MAX });
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| !task.is_completed())
            .filter(|(_, task)| {
                task.relevant_date()
                    .map(|date| date >= reference && date <= horizon)
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.matches_word(keyword))
            .collect()
    }

    fn check_bounds(&self, index: usize) -> Result<(), CommandError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(CommandError::IndexOutOfRange {
                number: index as i64 + 1,
                size: self.tasks.len(),
            })
        }
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
