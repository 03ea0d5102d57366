use crate::error::CoreError;
use crate::models::Team;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::TeamRepository for SqliteRepository {
    async fn add_team(&self, name: String) -> Result<Team, CoreError> {
        let team = sqlx::query_as(
            r#"INSERT INTO teams (id, name, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, created_at"#,
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;

        Ok(team)
    }

    async fn find_team_by_id(&self, id: Uuid) -> Result<Option<Team>, CoreError> {
        let team = sqlx::query_as("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(team)
    }

    async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, CoreError> {
        let team = sqlx::query_as("SELECT * FROM teams WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(team)
    }

    async fn find_teams(&self) -> Result<Vec<Team>, CoreError> {
        let teams = sqlx::query_as("SELECT * FROM teams ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(teams)
    }
}
