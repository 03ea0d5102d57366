use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path of the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
}

/// Configuration for recurring instance generation
#[derive(Deserialize, Debug)]
pub struct SchedulerSettings {
    /// Hour of day (UTC) at which instances are generated
    pub materialization_hour_utc: u32,
    /// How far back the backfill sweep creates missed instances (days)
    pub backfill_lookback_days: u32,
    /// Max occurrence advances per series per sweep
    pub backfill_max_per_series: usize,
    /// How often the backfill sweep runs (hours)
    pub sweep_interval_hours: u64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            materialization_hour_utc: 9,
            backfill_lookback_days: 90,
            backfill_max_per_series: 120,
            sweep_interval_hours: 24,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            scheduler: SchedulerSettings::default(),
        }
    }
}

fn default_database_path() -> String {
    "taskhive.db".to_string()
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("taskhive.toml"))
            .merge(Env::prefixed("TASKHIVE_"))
            .extract()
    }
}
