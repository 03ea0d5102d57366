use crate::error::CoreError;
use crate::models::{NewSeriesData, RecurrenceRule, RecurringSeries, Task};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

#[async_trait]
impl super::SeriesRepository for SqliteRepository {
    async fn create_series(&self, data: NewSeriesData) -> Result<RecurringSeries, CoreError> {
        let mut tx = self.pool().begin().await?;

        // The template task must exist.
        let _template: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(data.task_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Task with id {} not found", data.task_id)))?;

        // Defensive duplicate check; the UNIQUE constraint on task_id is the
        // final arbiter under concurrent creation.
        let existing: Option<RecurringSeries> =
            sqlx::query_as("SELECT * FROM recurring_series WHERE task_id = $1")
                .bind(data.task_id)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            return Err(CoreError::DuplicateSeries(data.task_id.to_string()));
        }

        let series = RecurringSeries {
            id: Uuid::now_v7(),
            task_id: data.task_id,
            frequency: data.rule.frequency,
            interval: data.rule.interval,
            days_of_week: Json(data.rule.days_of_week),
            day_of_month: data.rule.day_of_month,
            end_date: data.rule.end_date,
            next_due_date: data.next_due_date,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let insert = sqlx::query(
            r#"INSERT INTO recurring_series (id, task_id, frequency, interval, days_of_week, day_of_month, end_date, next_due_date, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(series.id)
        .bind(series.task_id)
        .bind(&series.frequency)
        .bind(series.interval)
        .bind(&series.days_of_week)
        .bind(series.day_of_month)
        .bind(series.end_date)
        .bind(series.next_due_date)
        .bind(series.active)
        .bind(series.created_at)
        .bind(series.updated_at)
        .execute(&mut *tx)
        .await;

        match insert {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(CoreError::DuplicateSeries(data.task_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        Ok(series)
    }

    async fn find_series_by_task(
        &self,
        task_id: Uuid,
    ) -> Result<Option<RecurringSeries>, CoreError> {
        let series = sqlx::query_as("SELECT * FROM recurring_series WHERE task_id = $1")
            .bind(task_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(series)
    }

    async fn update_series_rule(
        &self,
        task_id: Uuid,
        rule: &RecurrenceRule,
        next_due_date: DateTime<Utc>,
    ) -> Result<RecurringSeries, CoreError> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            r#"UPDATE recurring_series
            SET frequency = $1, interval = $2, days_of_week = $3, day_of_month = $4,
                end_date = $5, next_due_date = $6, updated_at = $7
            WHERE task_id = $8"#,
        )
        .bind(&rule.frequency)
        .bind(rule.interval)
        .bind(Json(rule.days_of_week.clone()))
        .bind(rule.day_of_month)
        .bind(rule.end_date)
        .bind(next_due_date)
        .bind(Utc::now())
        .bind(task_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!(
                "No recurring series for task {}",
                task_id
            )));
        }

        let updated: RecurringSeries =
            sqlx::query_as("SELECT * FROM recurring_series WHERE task_id = $1")
                .bind(task_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn set_series_active(&self, task_id: Uuid, active: bool) -> Result<u64, CoreError> {
        let result = sqlx::query(
            "UPDATE recurring_series SET active = $1, updated_at = $2 WHERE task_id = $3",
        )
        .bind(active)
        .bind(Utc::now())
        .bind(task_id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected())
    }

    async fn set_next_due_date(
        &self,
        series_id: Uuid,
        next_due_date: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let result = sqlx::query(
            "UPDATE recurring_series SET next_due_date = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(next_due_date)
        .bind(Utc::now())
        .bind(series_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!(
                "Series with id {} not found",
                series_id
            )));
        }
        Ok(())
    }

    async fn find_active_series(&self) -> Result<Vec<RecurringSeries>, CoreError> {
        let series =
            sqlx::query_as("SELECT * FROM recurring_series WHERE active = 1 ORDER BY created_at")
                .fetch_all(self.pool())
                .await?;
        Ok(series)
    }

    async fn find_active_series_due_before(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Vec<RecurringSeries>, CoreError> {
        let series = sqlx::query_as(
            r#"SELECT * FROM recurring_series
            WHERE active = 1 AND next_due_date < $1
            ORDER BY next_due_date"#,
        )
        .bind(instant)
        .fetch_all(self.pool())
        .await?;
        Ok(series)
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
