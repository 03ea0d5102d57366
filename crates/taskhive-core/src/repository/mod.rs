use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    NewSeriesData, NewTaskData, Project, RecurrenceRule, RecurringSeries, Task, Team,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

// Re-export domain modules
pub mod projects;
pub mod series;
pub mod tasks;
pub mod teams;

/// Domain-specific trait for task operations.
///
/// `find_instance_on_day` and `latest_position_in_team` exist for the
/// recurring-series manager: the first is the best-effort duplicate check
/// (same title, team, project, and calendar day), the second feeds the
/// board position of generated instances.
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_in_team(&self, team_id: Uuid) -> Result<Vec<Task>, CoreError>;
    async fn find_instance_on_day(
        &self,
        title: &str,
        team_id: Uuid,
        project_id: Option<Uuid>,
        day: NaiveDate,
    ) -> Result<Option<Task>, CoreError>;
    async fn latest_position_in_team(&self, team_id: Uuid) -> Result<i64, CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for team operations
#[async_trait]
pub trait TeamRepository {
    async fn add_team(&self, name: String) -> Result<Team, CoreError>;
    async fn find_team_by_id(&self, id: Uuid) -> Result<Option<Team>, CoreError>;
    async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, CoreError>;
    async fn find_teams(&self) -> Result<Vec<Team>, CoreError>;
}

/// Domain-specific trait for project operations
#[async_trait]
pub trait ProjectRepository {
    async fn add_project(&self, name: String, team_id: Uuid) -> Result<Project, CoreError>;
    async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>, CoreError>;
    async fn find_projects_in_team(&self, team_id: Uuid) -> Result<Vec<Project>, CoreError>;
}

/// Domain-specific trait for recurring series operations
#[async_trait]
pub trait SeriesRepository {
    async fn create_series(&self, data: NewSeriesData) -> Result<RecurringSeries, CoreError>;
    async fn find_series_by_task(&self, task_id: Uuid)
        -> Result<Option<RecurringSeries>, CoreError>;
    async fn update_series_rule(
        &self,
        task_id: Uuid,
        rule: &RecurrenceRule,
        next_due_date: DateTime<Utc>,
    ) -> Result<RecurringSeries, CoreError>;
    /// Returns the number of series rows affected (0 when no series exists).
    async fn set_series_active(&self, task_id: Uuid, active: bool) -> Result<u64, CoreError>;
    async fn set_next_due_date(
        &self,
        series_id: Uuid,
        next_due_date: DateTime<Utc>,
    ) -> Result<(), CoreError>;
    async fn find_active_series(&self) -> Result<Vec<RecurringSeries>, CoreError>;
    async fn find_active_series_due_before(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Vec<RecurringSeries>, CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository: TaskRepository + TeamRepository + ProjectRepository + SeriesRepository {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
