use anyhow::Result;
use taskhive_core::error::CoreError;
use taskhive_core::models::{Project, Team};
use taskhive_core::repository::Repository;
use uuid::Uuid;

pub fn parse_task_id(id: &str) -> Result<Uuid> {
    id.parse::<Uuid>()
        .map_err(|_| anyhow::anyhow!("Invalid task ID: '{}'. Expected a full UUID.", id))
}

pub async fn resolve_team(repo: &impl Repository, name: &str) -> Result<Team> {
    let team = repo
        .find_team_by_name(name)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Team '{}' not found", name)))?;
    Ok(team)
}

pub async fn resolve_project(
    repo: &impl Repository,
    team_id: Uuid,
    name: &str,
) -> Result<Project> {
    let project = repo
        .find_projects_in_team(team_id)
        .await?
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| CoreError::NotFound(format!("Project '{}' not found in team", name)))?;
    Ok(project)
}
