use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub team_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    /// Calendar-day key for generated instances, used by the uniqueness
    /// index on (series_id, due_day). None for ordinary tasks.
    pub due_day: Option<NaiveDate>,
    pub team_id: Uuid,
    pub project_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    /// Set on generated instances to link them back to their series.
    pub series_id: Option<Uuid>,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            title: "".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            due_day: None,
            team_id: Uuid::nil(),
            project_id: None,
            created_by: None,
            series_id: None,
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub due_day: Option<NaiveDate>,
    pub team_id: Uuid,
    pub project_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub series_id: Option<Uuid>,
    /// Explicit board position; when None the task is appended at the end
    /// of its team's board.
    pub position: Option<i64>,
}

// ============================================================================
// Recurrence Models
// ============================================================================

/// How often a recurring series produces occurrences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid frequency: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

/// A recurrence pattern attached to a task.
///
/// `days_of_week` (Sunday = 0) is only meaningful for weekly rules; an empty
/// set means "repeat on the weekday of the anchor date". `day_of_month` is
/// only meaningful for monthly rules; absent means "same day-of-month as the
/// anchor, clamped by the calendar".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Every N frequency units, 1..=365.
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    /// No further occurrences are generated after this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Partial update for an existing rule. Unset fields keep their prior
/// values; `end_date` is double-optional so it can be explicitly cleared.
#[derive(Debug, Clone, Default)]
pub struct RuleUpdate {
    pub frequency: Option<Frequency>,
    pub interval: Option<u32>,
    pub days_of_week: Option<Vec<u8>>,
    pub day_of_month: Option<u8>,
    pub end_date: Option<Option<DateTime<Utc>>>,
}

impl RuleUpdate {
    /// Merges this patch over an existing rule.
    pub fn apply(&self, base: &RecurrenceRule) -> RecurrenceRule {
        RecurrenceRule {
            frequency: self.frequency.unwrap_or(base.frequency),
            interval: self.interval.unwrap_or(base.interval),
            days_of_week: self
                .days_of_week
                .clone()
                .unwrap_or_else(|| base.days_of_week.clone()),
            day_of_month: self.day_of_month.or(base.day_of_month),
            end_date: match self.end_date {
                Some(end_date) => end_date,
                None => base.end_date,
            },
        }
    }
}

/// One recurring series per task: the stored rule plus generation state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecurringSeries {
    pub id: Uuid,
    /// The template task. Unique: a task has at most one series.
    pub task_id: Uuid,
    pub frequency: Frequency,
    pub interval: u32,
    pub days_of_week: Json<Vec<u8>>,
    pub day_of_month: Option<u8>,
    pub end_date: Option<DateTime<Utc>>,
    /// The next occurrence to materialize. Only ever advanced forward,
    /// except when the rule is recomputed at create/update.
    pub next_due_date: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecurringSeries {
    /// The recurrence rule this series stores.
    pub fn rule(&self) -> RecurrenceRule {
        RecurrenceRule {
            frequency: self.frequency,
            interval: self.interval,
            days_of_week: self.days_of_week.0.clone(),
            day_of_month: self.day_of_month,
            end_date: self.end_date,
        }
    }
}

/// Data required to persist a new series.
#[derive(Debug, Clone)]
pub struct NewSeriesData {
    pub task_id: Uuid,
    pub rule: RecurrenceRule,
    pub next_due_date: DateTime<Utc>,
}

/// A series together with its template task's display fields, as returned
/// by series info queries.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesInfo {
    pub series: RecurringSeries,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
}
