pub mod add;
pub mod backfill;
pub mod list;
pub mod project;
pub mod recur;
pub mod run;
pub mod team;
