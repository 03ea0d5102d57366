//! # Taskhive Core Library
//!
//! Team task management with timer-driven recurring task generation.
//!
//! ## Features
//!
//! - **Recurring Series**: Attach a daily, weekly, or monthly recurrence
//!   rule to any task and have dated instances generated automatically
//! - **Idempotent Materialization**: At most one instance per series per
//!   calendar day, enforced both by a pre-insert check and a storage-level
//!   uniqueness constraint
//! - **Bounded Backfill**: Occurrences missed while the process was down
//!   are caught up on startup and on a periodic sweep, limited by a
//!   lookback window and a per-series iteration cap
//! - **Type Safety**: Strongly-typed models persisted with sqlx
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`recurrence`]: Pure next-occurrence calculation
//! - [`manager`]: Series lifecycle and instance materialization
//! - [`scheduler`]: Clock abstraction and timer registry
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskhive_core::{
//!     db,
//!     manager::{SchedulerConfig, SeriesManager},
//!     models::{Frequency, NewTaskData, RecurrenceRule},
//!     repository::{SqliteRepository, TaskRepository, TeamRepository},
//!     scheduler::SystemClock,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("taskhive.db").await?;
//!     let repo = Arc::new(SqliteRepository::new(pool));
//!     let manager = SeriesManager::new(
//!         Arc::clone(&repo),
//!         Arc::new(SystemClock),
//!         SchedulerConfig::default(),
//!     );
//!
//!     let team = repo.add_team("platform".to_string()).await?;
//!     let task = repo
//!         .add_task(NewTaskData {
//!             title: "Daily standup".to_string(),
//!             team_id: team.id,
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     let rule = RecurrenceRule {
//!         frequency: Frequency::Weekly,
//!         interval: 1,
//!         days_of_week: vec![1, 2, 3, 4, 5],
//!         day_of_month: None,
//!         end_date: None,
//!     };
//!     let info = manager.create_series(task.id, rule).await?;
//!     println!("Next occurrence: {}", info.series.next_due_date);
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod manager;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod scheduler;
