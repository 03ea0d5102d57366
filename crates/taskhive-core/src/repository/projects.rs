use crate::error::CoreError;
use crate::models::Project;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::ProjectRepository for SqliteRepository {
    async fn add_project(&self, name: String, team_id: Uuid) -> Result<Project, CoreError> {
        let project = sqlx::query_as(
            r#"INSERT INTO projects (id, name, team_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, team_id, created_at"#,
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(team_id)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;

        Ok(project)
    }

    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, CoreError> {
        let project = sqlx::query_as("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(project)
    }

    async fn find_projects_in_team(&self, team_id: Uuid) -> Result<Vec<Project>, CoreError> {
        let projects = sqlx::query_as("SELECT * FROM projects WHERE team_id = $1 ORDER BY name")
            .bind(team_id)
            .fetch_all(self.pool())
            .await?;
        Ok(projects)
    }
}
