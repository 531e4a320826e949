use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::model::task::Task;
use crate::repository::codec::{decode_line, encode_task};
use crate::repository::traits::TaskRepository;

/// Plain-text task file, one task per line.
#[derive(Debug, Clone)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();

        if let Some(dir) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Could not create data directory {}", dir.display()))?;
        }
        if !file_path.exists() {
            File::create(&file_path)
                .with_context(|| format!("Could not create data file {}", file_path.display()))?;
            info!("Created empty data file {}", file_path.display());
        }

        Ok(FileTaskRepository { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl TaskRepository for FileTaskRepository {
    fn load(&self) -> Result<Vec<Task>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);

        let mut tasks = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("Could not read {}", self.file_path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let task = decode_line(&line).with_context(|| {
                format!(
                    "Corrupt entry on line {} of {}",
                    number + 1,
                    self.file_path.display()
                )
            })?;
            tasks.push(task);
        }

        info!("Loaded {} task(s) from {}", tasks.len(), self.file_path.display());
        Ok(tasks)
    }

    fn store(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Could not write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        for task in tasks {
            writeln!(writer, "{}", encode_task(task))?;
        }
        writer.flush()?;

        debug!("Stored {} task(s) to {}", tasks.len(), self.file_path.display());
        Ok(())
    }
}
