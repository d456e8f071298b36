//! Command-line front end for the task store and dashboard.
//!
//! The signed-in user comes from configuration; every command runs against
//! the SQLite store named by `db_path`.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use taskboard_core::db::open_db;
use taskboard_core::{
    compute_stats_now, core_version, flush_logging, init_logging, AppConfig,
    DashboardController, GateDecision, NewTask, Priority, RecordingNavigator,
    SqliteTaskRepository, StaticAuth, Task, TaskFilter, TaskService, User, ViewMode,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Track tasks and dashboard stats")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `db_path` from the config.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Overrides `user.id` from the config.
    #[arg(long, global = true)]
    user: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a task.
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List tasks, newest first.
    List {
        #[arg(long, default_value_t = TaskFilter::All)]
        filter: TaskFilter,
    },
    /// Mark a task completed.
    Done { id: Uuid },
    /// Mark a task active again.
    Undo { id: Uuid },
    /// Delete a task.
    Remove { id: Uuid },
    /// Print dashboard statistics.
    Stats,
    /// Render the dashboard.
    Dashboard {
        #[arg(long, default_value_t = TaskFilter::All)]
        filter: TaskFilter,
        /// Show the task list instead of the overview.
        #[arg(long)]
        tasks: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let result = run(Cli::parse());
    if let Err(err) = &result {
        error!("event=cli_exit module=cli status=error error={err}");
    }
    flush_logging();
    result
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    if let Some(user_id) = cli.user.clone() {
        config.user.id = user_id;
    }
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={} db_path={}",
        core_version(),
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)?;
    let service = TaskService::new(SqliteTaskRepository::new(&conn));
    let user: User = config.user.clone().into();

    match cli.command {
        Commands::Add {
            title,
            description,
            priority,
            category,
        } => {
            let task = service.create_task(
                &user.id,
                NewTask {
                    title,
                    description,
                    priority,
                    category,
                    ..NewTask::default()
                },
            )?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                println!("Task added with ID {}", task.id);
            }
        }
        Commands::List { filter } => {
            let tasks = service.list_tasks(&user.id, filter)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print_tasks(tasks.iter());
            }
        }
        Commands::Done { id } => {
            let task = service.set_completed(&user.id, id, true)?;
            println!("Completed: {}", task.title);
        }
        Commands::Undo { id } => {
            let task = service.set_completed(&user.id, id, false)?;
            println!("Reopened: {}", task.title);
        }
        Commands::Remove { id } => {
            service.delete_task(&user.id, id)?;
            println!("Removed {id}");
        }
        Commands::Stats => {
            let tasks = service.list_tasks(&user.id, TaskFilter::All)?;
            let stats = compute_stats_now(&tasks);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Active tasks:    {} ({})", stats.active, stats.active_trend);
                println!(
                    "Completed tasks: {} ({})",
                    stats.completed, stats.completed_trend
                );
                println!("Total tasks:     {}", stats.total);
                println!("Added this week: {}", stats.this_week_added);
            }
        }
        Commands::Dashboard { filter, tasks } => {
            let mut dashboard = DashboardController::new(
                StaticAuth::signed_in(user),
                service,
                RecordingNavigator::default(),
                config.signin_route.clone(),
            );
            dashboard.set_filter(filter);
            if tasks {
                dashboard.set_view_mode(ViewMode::Tasks);
            }

            match dashboard.sync() {
                GateDecision::Redirect(route) => {
                    println!("Not signed in; go to {route}");
                    return Ok(());
                }
                GateDecision::ShowPlaceholder => {
                    println!("Loading...");
                    return Ok(());
                }
                GateDecision::FetchTasks | GateDecision::Render | GateDecision::Idle => {}
            }
            if let Some(err) = dashboard.last_fetch_error() {
                eprintln!("warning: {err}");
            }

            let Some(view) = dashboard.view() else {
                return Ok(());
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            println!("{}", view.greeting);
            match view.view_mode {
                ViewMode::Overview => {
                    println!(
                        "Active {} | Completed {} | Total {} | Added this week {}",
                        view.stats.active,
                        view.stats.completed,
                        view.stats.total,
                        view.stats.this_week_added
                    );
                    println!("{} | {}", view.stats.active_trend, view.stats.completed_trend);
                }
                ViewMode::Tasks => {
                    println!("[{}] {}", view.filter, view.count_label);
                    match &view.empty_state {
                        Some(empty) => println!("{}\n{}", empty.title, empty.hint),
                        None => print_tasks(view.tasks.iter().copied()),
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_tasks<'a>(tasks: impl Iterator<Item = &'a Task>) {
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        let priority = task
            .priority
            .map(|priority| format!(" !{priority}"))
            .unwrap_or_default();
        println!("[{mark}] {} {}{priority}", task.id, task.title);
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};
    use taskboard_core::{Priority, TaskFilter};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_parses_optional_fields() {
        let cli = Cli::try_parse_from([
            "taskboard",
            "add",
            "water plants",
            "--priority",
            "High",
            "--category",
            "home",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                title,
                priority,
                category,
                ..
            } => {
                assert_eq!(title, "water plants");
                assert_eq!(priority, Some(Priority::High));
                assert_eq!(category.as_deref(), Some("home"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn dashboard_filter_defaults_to_all_and_rejects_unknown() {
        let cli = Cli::try_parse_from(["taskboard", "--json", "dashboard"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Dashboard {
                filter: TaskFilter::All,
                tasks: false
            }
        ));

        assert!(Cli::try_parse_from(["taskboard", "list", "--filter", "done"]).is_err());
    }
}
