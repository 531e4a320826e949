pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::Config;
pub use error::CommandError;
pub use input::{parse_command, Command};
pub use model::task::{Task, TaskKind};
pub use model::task_list::TaskList;
pub use repository::{FileTaskRepository, TaskRepository};
pub use service::response::Response;
pub use service::task_service::TaskService;
