mod commands;
mod render;
mod sheet;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::CreateArgs;

#[derive(Parser)]
#[command(name = "cellcal")]
#[command(about = "Attach reminders and tasks to spreadsheet cells, synced to your calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a reminder for a cell
    Add {
        #[command(flatten)]
        args: CreateArgs,

        /// All-day event instead of a 30-minute window
        #[arg(long)]
        all_day: bool,
    },
    /// Create an all-day task for a cell
    Task {
        #[command(flatten)]
        args: CreateArgs,
    },
    /// List reminders (or tasks)
    List {
        /// List tasks instead of reminders
        #[arg(long)]
        tasks: bool,
    },
    /// Delete the reminder (or task) attached to a cell
    Delete {
        /// Cell reference, e.g. "Sheet1!B2" or "B2"
        cell: String,

        /// Delete from the tasks namespace
        #[arg(long)]
        tasks: bool,

        /// Spreadsheet id the cell belongs to
        #[arg(long, default_value = "default")]
        spreadsheet_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Add { args, all_day } => commands::add::run(args, all_day).await,
        Commands::Task { args } => commands::task::run(args).await,
        Commands::List { tasks } => commands::list::run(tasks),
        Commands::Delete { cell, tasks, spreadsheet_id } => {
            commands::delete::run(&cell, tasks, &spreadsheet_id).await
        }
    }
}
