use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use std::path::PathBuf;
use todostore::{FileStore, FilterMode, TaskStore};

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore CLI - Local task list with write-through persistence")]
#[command(version)]
struct Cli {
    /// Path to the store directory (default: platform data dir, else current directory)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task text (words are joined with spaces)
        text: Vec<String>,
    },

    /// List tasks under a view filter
    List {
        /// View filter: all, active or completed
        #[arg(short, long, default_value_t = FilterMode::All)]
        filter: FilterMode,

        /// Show task creation times
        #[arg(long)]
        timestamps: bool,
    },

    /// Toggle a task between active and completed
    Toggle {
        /// Task id (shown by `list`)
        id: i64,
    },

    /// Replace a task's text
    Edit {
        /// Task id (shown by `list`)
        id: i64,

        /// Replacement text (words are joined with spaces)
        text: Vec<String>,
    },

    /// Delete a task
    Delete {
        /// Task id (shown by `list`)
        id: i64,
    },

    /// Remove all completed tasks
    ClearCompleted,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store_dir = cli
        .store_path
        .or_else(|| dirs::data_local_dir().map(|dir| dir.join("todostore")))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut store = TaskStore::new(FileStore::open(&store_dir)?);

    match cli.command {
        Commands::Add { text } => {
            let text = text.join(" ");
            let before = store.tasks().len();
            store.add_task(&text);
            match store.tasks().get(before) {
                Some(task) => println!("Added task {}", task.id),
                None => println!("Nothing to add"),
            }
        }

        Commands::List { filter, timestamps } => {
            store.set_filter(filter);
            for task in store.visible_tasks() {
                let marker = if task.completed { "x" } else { " " };
                let mut line = format!("{:>13} [{}] {}", task.id, marker, task.text);
                if timestamps {
                    if let Some(created) = DateTime::from_timestamp_millis(task.id) {
                        line.push_str(&format!("  ({})", created.format("%Y-%m-%d %H:%M")));
                    }
                }
                if task.completed {
                    println!("{}", line.dimmed().strikethrough());
                } else {
                    println!("{}", line);
                }
            }
            println!("{} items left", store.remaining_count());
            if store.has_completed() {
                println!("Run `todostore clear-completed` to drop finished tasks");
            }
        }

        Commands::Toggle { id } => {
            if store.tasks().iter().any(|task| task.id == id) {
                store.toggle_complete(id);
                println!("Toggled task {}", id);
            } else {
                println!("No task with id {}", id);
            }
        }

        Commands::Edit { id, text } => {
            store.start_edit(id);
            if store.editing().is_some() {
                store.update_draft(&text.join(" "));
                store.commit_edit();
                println!("Updated task {}", id);
            } else {
                println!("No task with id {}", id);
            }
        }

        Commands::Delete { id } => {
            if store.tasks().iter().any(|task| task.id == id) {
                store.delete_task(id);
                println!("Deleted task {}", id);
            } else {
                println!("No task with id {}", id);
            }
        }

        Commands::ClearCompleted => {
            let before = store.tasks().len();
            store.clear_completed();
            match before - store.tasks().len() {
                0 => println!("No completed tasks"),
                n => println!("Cleared {} completed tasks", n),
            }
        }
    }

    Ok(())
}
