use crate::model::task::Task;
use anyhow::Result;

pub trait TaskRepository {
    fn load(&self) -> Result<Vec<Task>>;
    fn store(&self, tasks: &[Task]) -> Result<()>;
}
