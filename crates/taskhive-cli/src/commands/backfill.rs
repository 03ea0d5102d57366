use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use std::sync::Arc;
use taskhive_core::manager::SeriesManager;

pub async fn backfill(manager: &Arc<SeriesManager>) -> Result<()> {
    let summary = manager.backfill_missed().await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Backfill complete: {} series processed, {} instances created",
        "✓".style(success_style),
        summary.series_processed,
        summary.instances_created
    );

    if summary.series_with_errors > 0 {
        let warn_style = Style::new().yellow().bold();
        println!(
            "{} {} series failed:",
            "!".style(warn_style),
            summary.series_with_errors
        );
        for error in &summary.errors {
            println!("  {}", error);
        }
    }

    Ok(())
}
