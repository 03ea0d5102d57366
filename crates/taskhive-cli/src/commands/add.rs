use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use taskhive_core::models::NewTaskData;
use taskhive_core::repository::Repository;

use crate::cli::AddCommand;
use crate::parser::parse_due_date;
use crate::util::{resolve_project, resolve_team};

pub async fn add_task(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let team = resolve_team(repo, &command.team).await?;
    let due_date = command.due.as_deref().map(parse_due_date).transpose()?;
    let project_id = match command.project.as_deref() {
        Some(name) => Some(resolve_project(repo, team.id, name).await?.id),
        None => None,
    };

    let new_task_data = NewTaskData {
        title: command.title,
        description: command.description,
        priority: command.priority,
        due_date,
        team_id: team.id,
        project_id,
        ..Default::default()
    };

    let added_task = repo.add_task(new_task_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        added_task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        added_task.id.to_string().yellow()
    );
    if let Some(due_date) = added_task.due_date {
        println!(
            "  {} Due: {}",
            "→".style(info_style),
            due_date.format("%Y-%m-%d %H:%M").to_string().cyan()
        );
    }

    Ok(())
}
