use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::io;
use std::path::PathBuf;
use task_manager::logging::{init_logging, parse_level};
use task_manager::{Config, TaskId, TaskManager, shell};

#[derive(Parser, Debug)]
#[command(version, about = "Keep a to-do list in a local JSON file")]
struct Cli {
    /// Task file to use instead of the configured one
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Configuration file (defaults to ./task-manager.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a pending task
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        #[arg(short = 'k', long)]
        category: String,
    },
    /// Show all tasks
    List,
    /// Mark a task as completed
    Complete { id: u32 },
    /// Remove a task
    Delete { id: u32 },
    /// Start an interactive session (the default)
    Shell,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = Config::load(args.config.as_deref()).context("cannot load configuration")?;
    if let Some(file) = args.file {
        config.file = file;
    }

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        parse_level(&config.log_level)?
    };
    let _log4rs_handle = init_logging(level)?;

    let mut manager = TaskManager::open(config.store())
        .with_context(|| format!("cannot open task file {}", config.file.display()))?;

    match args.command.unwrap_or(Commands::Shell) {
        Commands::Add {
            title,
            description,
            category,
        } => {
            let id = manager.add(title, description, category)?;
            manager.save()?;
            println!("Task added with ID {}", id);
        }
        Commands::List => {
            println!("{}", manager.render());
        }
        Commands::Complete { id } => {
            let id = TaskId::from(id);
            let rendered = manager.complete(id)?.to_string();
            manager.save()?;
            println!("#{} {}", id, rendered);
        }
        Commands::Delete { id } => {
            let id = TaskId::from(id);
            let task = manager.delete(id)?;
            manager.save()?;
            println!("Deleted task {}: {}", id, task.title());
        }
        Commands::Shell => {
            let stdin = io::stdin();
            shell::run(&mut manager, stdin.lock(), io::stdout().lock())?;
        }
    };

    Ok(())
}
