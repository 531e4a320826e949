mod tui;
mod ui;

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use fishball_core::{Config, FileTaskRepository, TaskRepository, TaskService};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::ui::Framing;

#[derive(Parser)]
#[command(name = "fishball")]
#[command(about = "A line-oriented task tracker", long_about = None)]
struct Cli {
    /// Task data file (default: ~/.fishball/fishball.txt)
    #[arg(short, long, env = "FISHBALL_FILE")]
    file: Option<PathBuf>,

    /// JSON config file (default: ~/.fishball/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More log output: -v for debug, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the terminal user interface
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(file) = cli.file {
        config.data_file = file;
    }

    let use_tui = matches!(cli.command, Some(Commands::Tui));
    init_logging(cli.verbose, use_tui, &config)?;

    let repo = FileTaskRepository::new(&config.data_file)?;
    let service = TaskService::new(repo, config).map_err(|err| {
        error!("Startup failed: {:#}", err);
        err
    })?;

    if use_tui {
        tui::run(service)
    } else {
        run_repl(service)
    }
}

fn init_logging(verbose: u8, use_tui: bool, config: &Config) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if use_tui {
        // the screen belongs to the TUI, so logs go next to the data file
        let log_path = config.data_file.with_file_name("fishball.log");
        if let Some(dir) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Could not open log file {}", log_path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run_repl<R: TaskRepository>(mut service: TaskService<R>) -> Result<()> {
    let framing = Framing::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "{}", framing.frame(&service.config().welcome_message))?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("Could not read from stdin")?;
        match service.process(&line) {
            Ok(response) => {
                write!(stdout, "{}", framing.frame(&response.message))?;
                stdout.flush()?;
                if response.should_exit {
                    break;
                }
            }
            Err(err) => {
                error!("{:#}", err);
                eprint!("{}", framing.frame(&format!("Your tasks could not be saved: {:#}", err)));
            }
        }
    }
    Ok(())
}
