use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};
use std::sync::Arc;
use taskhive_core::manager::SeriesManager;
use taskhive_core::models::{RecurrenceRule, RuleUpdate};

use crate::cli::{RecurCommand, RecurSubcommand};
use crate::parser::{parse_days_of_week, parse_due_date};
use crate::util::parse_task_id;
use crate::views::table::display_series_info;

pub async fn recur_command(manager: &Arc<SeriesManager>, command: RecurCommand) -> Result<()> {
    match command.command {
        RecurSubcommand::Create(create) => {
            let task_id = parse_task_id(&create.id)?;
            let days_of_week = create
                .on
                .as_deref()
                .map(parse_days_of_week)
                .transpose()?
                .unwrap_or_default();
            let end_date = create.until.as_deref().map(parse_due_date).transpose()?;

            let rule = RecurrenceRule {
                frequency: create.every,
                interval: create.interval,
                days_of_week,
                day_of_month: create.day_of_month,
                end_date,
            };

            let info = manager.create_series(task_id, rule).await?;
            let success_style = Style::new().green().bold();
            println!(
                "{} Created recurring series for: {}",
                "✓".style(success_style),
                info.title.bright_white().bold()
            );
            println!(
                "  {} Next occurrence: {}",
                "→".blue(),
                info.series
                    .next_due_date
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .cyan()
            );
        }
        RecurSubcommand::Update(update) => {
            let task_id = parse_task_id(&update.id)?;
            let days_of_week = update.on.as_deref().map(parse_days_of_week).transpose()?;
            let end_date = if update.until_clear {
                Some(None)
            } else {
                update
                    .until
                    .as_deref()
                    .map(parse_due_date)
                    .transpose()?
                    .map(Some)
            };

            let patch = RuleUpdate {
                frequency: update.every,
                interval: update.interval,
                days_of_week,
                day_of_month: update.day_of_month,
                end_date,
            };

            let info = manager.update_series(task_id, patch).await?;
            let success_style = Style::new().green().bold();
            println!(
                "{} Updated recurring series for: {}",
                "✓".style(success_style),
                info.title.bright_white().bold()
            );
            println!(
                "  {} Next occurrence: {}",
                "→".blue(),
                info.series
                    .next_due_date
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .cyan()
            );
        }
        RecurSubcommand::Stop(stop) => {
            let task_id = parse_task_id(&stop.id)?;

            if !stop.force {
                let confirmation = Confirm::new()
                    .with_prompt("Stop generating instances for this series?")
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Stop cancelled.");
                    return Ok(());
                }
            }

            manager.stop_series(task_id).await?;
            let success_style = Style::new().green().bold();
            println!("{} Series stopped.", "✓".style(success_style));
        }
        RecurSubcommand::Info(info_cmd) => {
            let task_id = parse_task_id(&info_cmd.id)?;
            let info = manager.series_info(task_id).await?;
            display_series_info(&info);
        }
    }
    Ok(())
}
