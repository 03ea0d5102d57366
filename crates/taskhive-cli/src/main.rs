use clap::Parser;
use owo_colors::{OwoColorize, Style};
use std::sync::Arc;
use taskhive_core::db;
use taskhive_core::error::CoreError;
use taskhive_core::manager::{SchedulerConfig, SeriesManager};
use taskhive_core::repository::SqliteRepository;
use taskhive_core::scheduler::SystemClock;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::new().unwrap_or_default();
    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = Arc::new(SqliteRepository::new(db_pool));

    let scheduler_config = SchedulerConfig {
        materialization_hour_utc: config.scheduler.materialization_hour_utc,
        backfill_lookback_days: config.scheduler.backfill_lookback_days,
        backfill_max_per_series: config.scheduler.backfill_max_per_series,
        sweep_interval_hours: config.scheduler.sweep_interval_hours,
    };
    let manager = SeriesManager::new(
        Arc::clone(&repository),
        Arc::new(SystemClock),
        scheduler_config,
    );

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(repository.as_ref(), command).await,
        cli::Commands::List(command) => {
            commands::list::list_tasks(repository.as_ref(), command).await
        }
        cli::Commands::Team(command) => {
            commands::team::team_command(repository.as_ref(), command).await
        }
        cli::Commands::Project(command) => {
            commands::project::project_command(repository.as_ref(), command).await
        }
        cli::Commands::Recur(command) => commands::recur::recur_command(&manager, command).await,
        cli::Commands::Backfill => commands::backfill::backfill(&manager).await,
        cli::Commands::Run => commands::run::run(&manager).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::DuplicateSeries(task_id) => {
                eprintln!(
                    "{} Task {} already has a recurring series. Use 'taskhive recur update' to change it.",
                    "Error:".style(error_style),
                    task_id.yellow()
                );
            }
            CoreError::InvalidRule(s) => {
                eprintln!(
                    "{} Invalid recurrence rule: {}",
                    "Error:".style(error_style),
                    s
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
