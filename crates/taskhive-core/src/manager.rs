use chrono::Duration;
use std::sync::{Arc, Weak};
use std::time::Duration as StdDuration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{
    NewSeriesData, NewTaskData, RecurrenceRule, RecurringSeries, RuleUpdate, SeriesInfo, Task,
    TaskStatus,
};
use crate::recurrence::RecurrenceCalculator;
use crate::repository::{SeriesRepository, SqliteRepository, TaskRepository};
use crate::scheduler::{fire_instant, Clock, TimerRegistry};

/// Tunables for instance generation and the backfill sweep.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Hour of day (UTC) at which series timers fire.
    pub materialization_hour_utc: u32,
    /// Occurrences older than this window are skipped during backfill.
    pub backfill_lookback_days: u32,
    /// Safety valve: max occurrence advances per series per sweep.
    pub backfill_max_per_series: usize,
    /// Cadence of the periodic backfill sweep.
    pub sweep_interval_hours: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            materialization_hour_utc: 9,
            backfill_lookback_days: 90,
            backfill_max_per_series: 120,
            sweep_interval_hours: 24,
        }
    }
}

/// Statistics collected during a backfill sweep
#[derive(Debug, Clone, Default)]
pub struct BackfillSummary {
    pub series_processed: usize,
    pub instances_created: usize,
    pub series_with_errors: usize,
    pub errors: Vec<String>,
}

/// SeriesManager: lifecycle of recurring series and time-driven generation
/// of task instances.
///
/// Owns the timer registry: creating a series registers a repeating timer
/// for it, updating reschedules it, stopping cancels it. Materialization is
/// idempotent per calendar day, checked against existing instances before
/// every insert and backstopped by a uniqueness constraint in storage. A
/// periodic sweep backfills occurrences missed while the process was down,
/// bounded by a lookback window and a per-series iteration cap.
pub struct SeriesManager {
    repo: Arc<SqliteRepository>,
    timers: TimerRegistry,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    // Handle to self for the spawned timer tasks; set by new_cyclic.
    this: Weak<Self>,
}

impl SeriesManager {
    pub fn new(
        repo: Arc<SqliteRepository>,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            repo,
            timers: TimerRegistry::new(),
            clock,
            config,
            this: this.clone(),
        })
    }

    /// Attaches a recurrence rule to a task and schedules its timer.
    ///
    /// Fails with `DuplicateSeries` if any series record (active or not)
    /// already exists for the task, and with `NotFound` if the task does
    /// not exist. The first `next_due_date` is computed from now.
    pub async fn create_series(
        &self,
        task_id: Uuid,
        rule: RecurrenceRule,
    ) -> Result<SeriesInfo, CoreError> {
        RecurrenceCalculator::validate(&rule)?;

        let now = self.clock.now();
        let next_due_date = RecurrenceCalculator::next_occurrence(now, &rule);
        let series = self
            .repo
            .create_series(NewSeriesData {
                task_id,
                rule,
                next_due_date,
            })
            .await?;

        info!(task_id = %task_id, next_due = %series.next_due_date, "created recurring series");
        self.schedule_series(&series);
        self.series_info(task_id).await
    }

    /// Merges a partial rule over the existing one, recomputes
    /// `next_due_date` from now, and reschedules the timer.
    pub async fn update_series(
        &self,
        task_id: Uuid,
        patch: RuleUpdate,
    ) -> Result<SeriesInfo, CoreError> {
        let existing = self
            .repo
            .find_series_by_task(task_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound(format!("No recurring series for task {}", task_id))
            })?;

        let merged = patch.apply(&existing.rule());
        RecurrenceCalculator::validate(&merged)?;

        let now = self.clock.now();
        let next_due_date = RecurrenceCalculator::next_occurrence(now, &merged);
        let series = self
            .repo
            .update_series_rule(task_id, &merged, next_due_date)
            .await?;

        info!(task_id = %task_id, next_due = %series.next_due_date, "updated recurring series");
        self.timers.cancel(task_id);
        self.schedule_series(&series);
        self.series_info(task_id).await
    }

    /// Ensure-stopped: cancels the timer and deactivates the series.
    /// Succeeds even when no series exists.
    pub async fn stop_series(&self, task_id: Uuid) -> Result<(), CoreError> {
        self.timers.cancel(task_id);
        let affected = self.repo.set_series_active(task_id, false).await?;
        if affected > 0 {
            info!(task_id = %task_id, "stopped recurring series");
        }
        Ok(())
    }

    /// The persisted series plus its template task's display fields.
    pub async fn series_info(&self, task_id: Uuid) -> Result<SeriesInfo, CoreError> {
        let series = self
            .repo
            .find_series_by_task(task_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound(format!("No recurring series for task {}", task_id))
            })?;

        let template = self
            .repo
            .find_task_by_id(series.task_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound(format!("Task with id {} not found", series.task_id))
            })?;

        Ok(SeriesInfo {
            series,
            title: template.title,
            description: template.description,
            priority: template.priority,
        })
    }

    /// Re-registers timers for every active series (e.g. after a restart)
    /// and starts the periodic backfill sweep. The first sweep runs
    /// immediately, picking up occurrences missed while the process was
    /// down.
    pub async fn initialize(&self) -> Result<(), CoreError> {
        let active = self.repo.find_active_series().await?;
        info!(count = active.len(), "scheduling active recurring series");
        for series in &active {
            self.schedule_series(series);
        }

        // The sweep holds only a weak handle so shutdown is never kept
        // alive by its own background task.
        let this = self.this.clone();
        let period = StdDuration::from_secs(self.config.sweep_interval_hours * 3600);
        let sweep = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let Some(manager) = this.upgrade() else {
                    break;
                };
                match manager.backfill_missed().await {
                    Ok(summary) => {
                        if summary.series_processed > 0 {
                            info!(
                                series = summary.series_processed,
                                created = summary.instances_created,
                                errors = summary.series_with_errors,
                                "backfill sweep finished"
                            );
                        }
                    }
                    Err(e) => error!("backfill sweep failed: {}", e),
                }
            }
        });
        self.timers.register_sweep(sweep);
        Ok(())
    }

    /// Aborts all timers. Called on shutdown.
    pub fn shutdown(&self) {
        self.timers.shutdown();
    }

    /// Whether a materialization timer is registered for this task.
    pub fn is_scheduled(&self, task_id: Uuid) -> bool {
        self.timers.is_scheduled(task_id)
    }

    fn schedule_series(&self, series: &RecurringSeries) {
        let this = self.this.clone();
        let task_id = series.task_id;

        // The timer task upgrades its weak handle per iteration and holds
        // no strong reference across the sleep.
        let handle = tokio::spawn(async move {
            loop {
                let (series, wait) = {
                    let Some(manager) = this.upgrade() else {
                        break;
                    };
                    let series = match manager.repo.find_series_by_task(task_id).await {
                        Ok(Some(series)) if series.active => series,
                        Ok(_) => break,
                        Err(e) => {
                            warn!(task_id = %task_id, "series timer lost its series: {}", e);
                            break;
                        }
                    };

                    let fire_at = fire_instant(
                        series.next_due_date,
                        manager.config.materialization_hour_utc,
                    );
                    let wait = (fire_at - manager.clock.now())
                        .to_std()
                        .unwrap_or(StdDuration::ZERO);
                    debug!(task_id = %task_id, fire_at = %fire_at, "series timer sleeping");
                    (series, wait)
                };
                tokio::time::sleep(wait).await;

                let Some(manager) = this.upgrade() else {
                    break;
                };
                if let Err(e) = manager.materialize_if_due(&series).await {
                    error!(task_id = %task_id, "materialization failed: {}", e);
                }
            }
        });

        self.timers.register(task_id, handle);
    }

    /// Materializes the series' due occurrence if no instance exists for
    /// that calendar day, then advances `next_due_date` past it.
    ///
    /// The advance happens whether or not an instance was created, so a
    /// single occurrence can never wedge the series into an infinite
    /// catch-up loop. Past the rule's end date the series is stopped
    /// instead.
    pub async fn materialize_if_due(
        &self,
        series: &RecurringSeries,
    ) -> Result<Option<Task>, CoreError> {
        if !series.active {
            return Ok(None);
        }

        let now = self.clock.now();
        if let Some(end_date) = series.end_date {
            if now > end_date {
                info!(task_id = %series.task_id, "series end date passed, stopping");
                self.stop_series(series.task_id).await?;
                return Ok(None);
            }
        }

        let occurrence = series.next_due_date;
        let created = self.materialize_occurrence(series, occurrence).await?;

        let next = RecurrenceCalculator::next_occurrence(occurrence, &series.rule());
        self.repo.set_next_due_date(series.id, next).await?;

        Ok(created)
    }

    /// Scans all active series whose `next_due_date` has passed and
    /// materializes missed occurrences, bounded by the lookback window and
    /// the per-series iteration cap. Failures in one series are logged and
    /// do not abort the sweep for the rest.
    pub async fn backfill_missed(&self) -> Result<BackfillSummary, CoreError> {
        let now = self.clock.now();
        let cutoff = now - Duration::days(self.config.backfill_lookback_days as i64);

        let overdue = self.repo.find_active_series_due_before(now).await?;
        let mut summary = BackfillSummary::default();

        for series in overdue {
            summary.series_processed += 1;
            match self.backfill_series(&series, now, cutoff).await {
                Ok(created) => summary.instances_created += created,
                Err(e) => {
                    warn!(task_id = %series.task_id, "backfill failed for series: {}", e);
                    summary.series_with_errors += 1;
                    summary.errors.push(format!("{}: {}", series.task_id, e));
                }
            }
        }

        Ok(summary)
    }

    async fn backfill_series(
        &self,
        series: &RecurringSeries,
        now: chrono::DateTime<chrono::Utc>,
        cutoff: chrono::DateTime<chrono::Utc>,
    ) -> Result<usize, CoreError> {
        let rule = series.rule();
        let mut current = series.next_due_date;
        let mut iterations = 0usize;
        let mut created = 0usize;

        while current < now && iterations < self.config.backfill_max_per_series {
            if let Some(end_date) = series.end_date {
                if current > end_date {
                    info!(task_id = %series.task_id, "series end date passed during backfill, stopping");
                    self.stop_series(series.task_id).await?;
                    break;
                }
            }

            // Occurrences older than the lookback window are advanced past
            // without creating instances.
            if current >= cutoff {
                if self.materialize_occurrence(series, current).await?.is_some() {
                    created += 1;
                }
            }

            current = RecurrenceCalculator::next_occurrence(current, &rule);
            iterations += 1;
        }

        // Persist the final boundary once per series.
        self.repo.set_next_due_date(series.id, current).await?;
        Ok(created)
    }

    /// Creates an instance for the occurrence unless one already exists on
    /// that calendar day. The day check matches on title, team, project,
    /// and a day-wide due-date window; the storage-level uniqueness index
    /// on (series_id, due_day) backstops races, with a unique violation
    /// treated as "already exists".
    async fn materialize_occurrence(
        &self,
        series: &RecurringSeries,
        occurrence: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<Task>, CoreError> {
        let template = self
            .repo
            .find_task_by_id(series.task_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound(format!("Task with id {} not found", series.task_id))
            })?;

        let day = occurrence.date_naive();
        let existing = self
            .repo
            .find_instance_on_day(&template.title, template.team_id, template.project_id, day)
            .await?;
        if existing.is_some() {
            debug!(task_id = %series.task_id, day = %day, "instance already exists, skipping");
            return Ok(None);
        }

        let data = NewTaskData {
            title: template.title.clone(),
            description: template.description.clone(),
            status: Some(TaskStatus::Todo),
            priority: Some(template.priority.clone()),
            due_date: Some(occurrence),
            due_day: Some(day),
            team_id: template.team_id,
            project_id: template.project_id,
            created_by: template.created_by,
            series_id: Some(series.id),
            position: None,
        };

        match self.repo.add_task(data).await {
            Ok(task) => {
                info!(task_id = %series.task_id, instance = %task.id, day = %day, "materialized instance");
                Ok(Some(task))
            }
            Err(CoreError::Database(e))
                if crate::repository::series::is_unique_violation(&e) =>
            {
                debug!(task_id = %series.task_id, day = %day, "lost materialization race, skipping");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
