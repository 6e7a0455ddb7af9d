//! Valet CLI entry point.
//!
//! Drives the assistant tool surface from the command line, with events
//! read from a local JSON file in place of the remote calendar service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use valet::tools::{
    AddTaskParams, CreateEventParams, DeleteTaskParams, FreeTimeParams, GetEventsParams,
    ListTasksParams, UpdateTaskStatusParams,
};
use valet::{Assistant, Config, EventSource, FixtureEventSource};

/// Valet: personal assistant tools for calendar availability and tasks.
#[derive(Parser, Debug)]
#[command(name = "valet")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// JSON file of calendar events standing in for the remote calendar
    #[arg(short, long, global = true)]
    events: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find free time slots on a date
    FreeTime {
        /// Date to check (YYYY-MM-DD)
        date: String,
    },
    /// List upcoming calendar events
    Events {
        /// Number of days to look ahead (1-30)
        #[arg(short, long, default_value = "7")]
        days: i64,
    },
    /// Create a calendar event
    CreateEvent {
        /// Event title
        title: String,
        /// Start time (YYYY-MM-DDTHH:MM:SS, or YYYY-MM-DD for all-day)
        start: String,
        /// End time, same format as start
        end: String,
        /// Event description
        #[arg(short, long)]
        description: Option<String>,
        /// Event location
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Task tracking
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Show which integrations are configured
    Status,
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// List tasks
    List {
        /// Filter by status: all, pending, in_progress, completed
        #[arg(short, long, default_value = "all")]
        status: String,
    },
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
        /// Priority: low, medium, high
        #[arg(short, long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// Update a task's status
    SetStatus {
        /// Task ID
        id: u64,
        /// New status: pending, in_progress, completed
        status: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let source: Option<Arc<dyn EventSource>> = match &args.events {
        Some(path) => Some(Arc::new(
            FixtureEventSource::from_file(path, config.calendar.utc_offset()).await?,
        )),
        None => None,
    };

    let assistant = Assistant::new(config, source);

    let output = match args.command {
        Command::FreeTime { date } => assistant.get_free_time(FreeTimeParams { date }).await,
        Command::Events { days } => {
            assistant
                .get_events(GetEventsParams { days: Some(days) })
                .await
        }
        Command::CreateEvent {
            title,
            start,
            end,
            description,
            location,
        } => {
            assistant
                .create_event(CreateEventParams {
                    title,
                    start,
                    end,
                    description,
                    location,
                })
                .await
        }
        Command::Tasks { command } => match command {
            TaskCommand::List { status } => {
                assistant
                    .list_tasks(ListTasksParams {
                        status: Some(status),
                    })
                    .await
            }
            TaskCommand::Add {
                title,
                description,
                priority,
                due,
            } => {
                assistant
                    .add_task(AddTaskParams {
                        title,
                        description,
                        priority,
                        due_date: due,
                    })
                    .await
            }
            TaskCommand::SetStatus { id, status } => {
                assistant
                    .update_task_status(UpdateTaskStatusParams { id, status })
                    .await
            }
            TaskCommand::Delete { id } => assistant.delete_task(DeleteTaskParams { id }).await,
        },
        Command::Status => assistant.service_status(),
    };

    println!("{output}");
    Ok(())
}
