use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::{debug, error};

use crate::config::Config;
use crate::error::CommandError;
use crate::input::{parse_command, Command};
use crate::model::task::Task;
use crate::model::task_list::TaskList;
use crate::repository::TaskRepository;
use crate::service::response::{count_line, Response, HELP_TEXT};

/// The command interpreter: owns the task list and writes it back through
/// the repository after every successful change.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: TaskList,
    config: Config,
}

impl<R: TaskRepository> TaskService<R> {
    /// Loads the stored tasks. A corrupt or unreadable file is fatal here.
    pub fn new(repo: R, config: Config) -> Result<Self> {
        let tasks = TaskList::from(repo.load().context("Could not load saved tasks")?);
        Ok(Self { repo, tasks, config })
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn process(&mut self, line: &str) -> Result<Response> {
        self.process_at(line, Local::now().naive_local())
    }

    /// Runs one line against the list, with `now` as the reference time for
    /// `reminder`.
    ///
    /// Command errors come back as an error [`Response`]; only a failed save
    /// is returned as `Err`.
    pub fn process_at(&mut self, line: &str, now: NaiveDateTime) -> Result<Response> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                debug!("Rejected input {:?}: {}", line, err);
                return Ok(self.error_response(err));
            }
        };
        debug!("Running {:?}", command);

        let mutating = command.is_mutating();
        let response = match self.execute(command, now) {
            Ok(response) => response,
            Err(err) => {
                debug!("Command failed: {}", err);
                return Ok(self.error_response(err));
            }
        };

        if mutating {
            if let Err(err) = self.repo.store(self.tasks.all()) {
                error!("Failed to save tasks: {:#}", err);
                return Err(err.context("Could not save tasks"));
            }
        }
        Ok(response)
    }

    fn execute(&mut self, command: Command, now: NaiveDateTime) -> Result<Response, CommandError> {
        let response = match command {
            Command::Bye => Response::exit(self.config.exit_message.clone()),
            Command::Help => Response::reply(HELP_TEXT),
            Command::List => {
                if self.tasks.is_empty() {
                    Response::reply("Your task list is empty.")
                } else {
                    let listed = self.tasks.iter().enumerate().collect::<Vec<_>>();
                    Response::reply(render("Here are the tasks in your list:", &listed))
                }
            }
            Command::Find(keyword) => {
                let found = self.tasks.find(&keyword);
                if found.is_empty() {
                    Response::reply(format!("No tasks match \"{}\".", keyword))
                } else {
                    Response::reply(render("Here are the matching tasks in your list:", &found))
                }
            }
            Command::Reminder => {
                let days = self.config.reminder_days;
                let upcoming = self.tasks.upcoming_within(days, now);
                if upcoming.is_empty() {
                    Response::reply(format!("No upcoming tasks in the next {} days.", days))
                } else {
                    let header = format!("Here are your tasks due within the next {} days:", days);
                    Response::reply(render(&header, &upcoming))
                }
            }
            Command::Mark(number) => {
                let index = self.resolve(number)?;
                let task = self.tasks.get_mut(index)?;
                task.mark();
                Response::reply(format!("Nice! I've marked this task as done:\n  {}", task))
            }
            Command::Unmark(number) => {
                let index = self.resolve(number)?;
                let task = self.tasks.get_mut(index)?;
                task.unmark();
                Response::reply(format!("OK, I've marked this task as not done yet:\n  {}", task))
            }
            Command::Delete(number) => {
                let index = self.resolve(number)?;
                let removed = self.tasks.remove(index)?;
                Response::reply(format!(
                    "Noted. I've removed this task:\n  {}\n{}",
                    removed,
                    count_line(self.tasks.len())
                ))
            }
            Command::Todo(description) => self.add(Task::todo(description)?),
            Command::Deadline { description, due } => self.add(Task::deadline(description, due)?),
            Command::Event { description, start, end } => {
                self.add(Task::event(description, start, end)?)
            }
        };
        Ok(response)
    }

    fn add(&mut self, task: Task) -> Response {
        let shown = task.to_string();
        self.tasks.add(task);
        Response::reply(format!(
            "Got it. I've added this task:\n  {}\n{}",
            shown,
            count_line(self.tasks.len())
        ))
    }

    /// Turns a 1-based task number into a list position.
    fn resolve(&self, number: i64) -> Result<usize, CommandError> {
        let size = self.tasks.len();
        if number < 1 || number as u64 > size as u64 {
            return Err(CommandError::IndexOutOfRange { number, size });
        }
        Ok(number as usize - 1)
    }

    fn error_response(&self, err: CommandError) -> Response {
        Response::error(format!("{}{}", self.config.error_prefix, err))
    }
}

fn render(header: &str, rows: &[(usize, &Task)]) -> String {
    let mut out = String::from(header);
    for (index, task) in rows {
        out.push_str(&format!("\n{}.{}", index + 1, task));
    }
    out
}
