use clap::{Parser, Subcommand};
use taskhive_core::models::{Frequency, TaskPriority};

/// A team task manager with timer-driven recurring tasks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks on a team's board
    List(ListCommand),
    /// Manage teams
    Team(TeamCommand),
    /// Manage projects
    Project(ProjectCommand),
    /// Manage recurring task series
    Recur(RecurCommand),
    /// Catch up on missed recurring occurrences
    Backfill,
    /// Run the scheduler: keep timers armed and generate instances
    Run,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The team to add the task to
    #[clap(short, long)]
    pub team: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// The due date of the task (e.g., 'tomorrow', '2025-12-31')
    #[clap(long)]
    pub due: Option<String>,
    /// The project of the task
    #[clap(short, long)]
    pub project: Option<String>,
    /// The priority of the task (low, medium, high)
    #[clap(long)]
    pub priority: Option<TaskPriority>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// The team whose board to list
    #[clap(short, long)]
    pub team: String,
    /// The project to filter by
    #[clap(short, long)]
    pub project: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TeamCommand {
    #[command(subcommand)]
    pub command: TeamSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TeamSubcommand {
    /// Add a new team
    Add(AddTeamCommand),
    /// List teams
    List,
}

#[derive(Parser, Debug, Clone)]
pub struct AddTeamCommand {
    /// The name of the team
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectSubcommand {
    /// Add a new project
    Add(AddProjectCommand),
    /// List projects in a team
    List(ListProjectsCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddProjectCommand {
    /// The name of the project
    pub name: String,
    /// The team the project belongs to
    #[clap(short, long)]
    pub team: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ListProjectsCommand {
    /// The team whose projects to list
    #[clap(short, long)]
    pub team: String,
}

/// Recurring series commands
#[derive(Parser, Debug, Clone)]
pub struct RecurCommand {
    #[command(subcommand)]
    pub command: RecurSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RecurSubcommand {
    /// Attach a recurrence rule to a task
    Create(RecurCreateCommand),
    /// Change the rule of an existing series
    Update(RecurUpdateCommand),
    /// Stop a series from generating new instances
    Stop(RecurStopCommand),
    /// Show series information
    Info(RecurInfoCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct RecurCreateCommand {
    /// The template task ID
    pub id: String,
    /// Frequency (daily, weekly, monthly)
    #[clap(long)]
    pub every: Frequency,
    /// Every N frequency units
    #[clap(long, default_value = "1")]
    pub interval: u32,
    /// Days of week for weekly rules (e.g., 'mon,wed,fri')
    #[clap(long)]
    pub on: Option<String>,
    /// Day of month for monthly rules (1-31)
    #[clap(long)]
    pub day_of_month: Option<u8>,
    /// End date (e.g., '2025-12-31')
    #[clap(long)]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RecurUpdateCommand {
    /// The template task ID
    pub id: String,
    /// New frequency (daily, weekly, monthly)
    #[clap(long)]
    pub every: Option<Frequency>,
    /// Every N frequency units
    #[clap(long)]
    pub interval: Option<u32>,
    /// Days of week for weekly rules (e.g., 'mon,wed,fri')
    #[clap(long)]
    pub on: Option<String>,
    /// Day of month for monthly rules (1-31)
    #[clap(long)]
    pub day_of_month: Option<u8>,
    /// New end date
    #[clap(long, conflicts_with = "until_clear")]
    pub until: Option<String>,
    /// Remove the end date
    #[clap(long)]
    pub until_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RecurStopCommand {
    /// The template task ID
    pub id: String,
    /// Stop without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RecurInfoCommand {
    /// The template task ID
    pub id: String,
}
