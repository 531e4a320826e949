use chrono::Local;
use fishball_core::{TaskRepository, TaskService};
use ratatui::widgets::TableState;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Speaker {
    User,
    Fishball,
    Problem,
}

pub struct Entry {
    pub speaker: Speaker,
    pub time: String,
    pub text: String,
}

pub struct App<R: TaskRepository> {
    pub service: TaskService<R>,
    pub transcript: Vec<Entry>,
    pub state: TableState,
    pub input: String,
    pub cursor_position: usize,
    pub should_quit: bool,
}

impl<R: TaskRepository> App<R> {
    pub fn new(service: TaskService<R>) -> App<R> {
        let welcome = service.config().welcome_message.clone();
        let mut state = TableState::default();
        if !service.tasks().is_empty() {
            state.select(Some(0));
        }
        let mut app = App {
            service,
            transcript: Vec::new(),
            state,
            input: String::new(),
            cursor_position: 0,
            should_quit: false,
        };
        app.push(Speaker::Fishball, welcome);
        app
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        self.transcript.push(Entry {
            speaker,
            time: Local::now().format("%H:%M").to_string(),
            text,
        });
    }

    pub fn next(&mut self) {
        let len = self.service.tasks().len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.service.tasks().len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Sends the input line to the interpreter and records both sides.
    pub fn submit_command(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        self.push(Speaker::User, line.clone());

        match self.service.process(&line) {
            Ok(response) => {
                let speaker = if response.is_error { Speaker::Problem } else { Speaker::Fishball };
                self.push(speaker, response.message);
                if response.should_exit {
                    self.should_quit = true;
                }
            }
            Err(err) => {
                error!("{:#}", err);
                self.push(Speaker::Problem, format!("Your tasks could not be saved: {:#}", err));
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.service.tasks().len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }
}
