use crate::error::CoreError;
use crate::models::{NewTaskData, Task, TaskPriority, TaskStatus};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let position = match data.position {
            Some(position) => position,
            None => self.latest_position_in_team(data.team_id).await? + 1,
        };

        let task = Task {
            id: Uuid::now_v7(),
            title: data.title,
            description: data.description,
            status: data.status.unwrap_or(TaskStatus::Todo),
            priority: data.priority.unwrap_or(TaskPriority::Medium),
            due_date: data.due_date,
            due_day: data.due_day,
            team_id: data.team_id,
            project_id: data.project_id,
            created_by: data.created_by,
            series_id: data.series_id,
            position,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"INSERT INTO tasks (id, title, description, status, priority, due_date, due_day, team_id, project_id, created_by, series_id, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(&task.priority)
        .bind(task.due_date)
        .bind(task.due_day)
        .bind(task.team_id)
        .bind(task.project_id)
        .bind(task.created_by)
        .bind(task.series_id)
        .bind(task.position)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(self.pool())
        .await?;

        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks_in_team(&self, team_id: Uuid) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as("SELECT * FROM tasks WHERE team_id = $1 ORDER BY position")
            .bind(team_id)
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn find_instance_on_day(
        &self,
        title: &str,
        team_id: Uuid,
        project_id: Option<Uuid>,
        day: NaiveDate,
    ) -> Result<Option<Task>, CoreError> {
        let day_start = day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        let day_end = day_start.map(|dt| dt + Duration::days(1));

        let task = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE title = $1 AND team_id = $2 AND project_id IS $3
            AND due_date >= $4 AND due_date < $5
            LIMIT 1"#,
        )
        .bind(title)
        .bind(team_id)
        .bind(project_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_optional(self.pool())
        .await?;
        Ok(task)
    }

    async fn latest_position_in_team(&self, team_id: Uuid) -> Result<i64, CoreError> {
        let (position,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(position), 0) FROM tasks WHERE team_id = $1")
                .bind(team_id)
                .fetch_one(self.pool())
                .await?;
        Ok(position)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        // The series, if any, goes with the task via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Task with id {} not found", id)));
        }
        Ok(())
    }
}
