use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use taskhive_core::repository::Repository;

use crate::cli::{ProjectCommand, ProjectSubcommand};
use crate::util::resolve_team;
use crate::views::table::display_projects;

pub async fn project_command(repo: &impl Repository, command: ProjectCommand) -> Result<()> {
    match command.command {
        ProjectSubcommand::Add(add) => {
            let team = resolve_team(repo, &add.team).await?;
            let project = repo.add_project(add.name, team.id).await?;
            let success_style = Style::new().green().bold();
            println!(
                "{} Created project: {} in team {}",
                "✓".style(success_style),
                project.name.bright_white().bold(),
                team.name.cyan()
            );
        }
        ProjectSubcommand::List(list) => {
            let team = resolve_team(repo, &list.team).await?;
            let projects = repo.find_projects_in_team(team.id).await?;
            display_projects(&projects);
        }
    }
    Ok(())
}
