use anyhow::Result;
use std::collections::HashMap;
use taskhive_core::repository::Repository;

use crate::cli::ListCommand;
use crate::util::resolve_team;
use crate::views::table::display_tasks;

pub async fn list_tasks(repo: &impl Repository, command: ListCommand) -> Result<()> {
    let team = resolve_team(repo, &command.team).await?;

    let projects = repo.find_projects_in_team(team.id).await?;
    let project_names: HashMap<_, _> = projects.iter().map(|p| (p.id, p.name.clone())).collect();

    let mut tasks = repo.find_tasks_in_team(team.id).await?;
    if let Some(project_name) = &command.project {
        let project = projects
            .iter()
            .find(|p| &p.name == project_name)
            .ok_or_else(|| anyhow::anyhow!("Project '{}' not found in team", project_name))?;
        tasks.retain(|t| t.project_id == Some(project.id));
    }

    display_tasks(&tasks, &project_names);
    Ok(())
}
