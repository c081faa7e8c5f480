use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskdir_core::task_manager::{TaskManager, TaskManagerConfig};

mod commands;
mod palette;
mod reporter;

/// taskdir - Run the scripts and programs of a task directory
#[derive(Parser)]
#[command(name = "taskdir")]
#[command(about = "A directory-convention task runner")]
#[command(version)]
struct Cli {
    /// Path to the project root (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Directory below the root that holds the tasks (overrides .taskdir/config.yml)
    #[arg(long, global = true)]
    tasks_dir: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log level (error, warn, info, debug, trace); takes precedence over -v
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks
    List {
        /// Also show every member of each task and how it is classified
        #[arg(long)]
        members: bool,
    },
    /// Show what running a task would launch, without running it
    Plan {
        /// Task name
        task: String,
    },
    /// Run tasks in order (all tasks when none are given)
    Run {
        /// Task names
        tasks: Vec<String>,
    },
    /// Install the dependencies declared by every task's config files
    Install,
    /// Print the JSON schema of .taskdir/config.yml
    Schema,
}

fn init_logging(verbose: u8, log_level: Option<&str>) {
    let level = match log_level.map(str::to_lowercase).as_deref() {
        Some("trace") => log::LevelFilter::Trace,
        Some("debug") => log::LevelFilter::Debug,
        Some("info") => log::LevelFilter::Info,
        Some("warn") => log::LevelFilter::Warn,
        Some("error") => log::LevelFilter::Error,
        Some("off") => log::LevelFilter::Off,
        Some(_) => log::LevelFilter::Info,
        None => match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        },
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn load_manager(config: TaskManagerConfig) -> Result<TaskManager> {
    TaskManager::new(config).map_err(|e| anyhow::anyhow!("Failed to initialize task runner: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_level.as_deref());

    let config = TaskManagerConfig {
        root: cli.root,
        tasks_dir: cli.tasks_dir,
    };

    // Execute command (CLI layer only handles presentation)
    let success = match cli.command {
        Commands::List { members } => commands::list::execute(&load_manager(config)?, members)?,
        Commands::Plan { task } => commands::plan::execute(&load_manager(config)?, &task)?,
        Commands::Run { tasks } => commands::run::execute(&load_manager(config)?, &tasks)?,
        Commands::Install => commands::install::execute(&load_manager(config)?)?,
        Commands::Schema => commands::schema::execute()?,
    };

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
