use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use std::sync::Arc;
use taskhive_core::manager::SeriesManager;
use tracing::info;

/// Runs the scheduler in the foreground until interrupted. Timers for all
/// active series are armed and the periodic backfill sweep picks up
/// anything missed while the process was down.
pub async fn run(manager: &Arc<SeriesManager>) -> Result<()> {
    manager.initialize().await?;

    let info_style = Style::new().blue();
    println!(
        "{} Scheduler running. Press Ctrl-C to stop.",
        "→".style(info_style)
    );

    tokio::signal::ctrl_c().await?;
    info!("shutting down scheduler");
    manager.shutdown();

    Ok(())
}
