use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use taskhive_core::repository::Repository;

use crate::cli::{TeamCommand, TeamSubcommand};
use crate::views::table::display_teams;

pub async fn team_command(repo: &impl Repository, command: TeamCommand) -> Result<()> {
    match command.command {
        TeamSubcommand::Add(add) => {
            let team = repo.add_team(add.name).await?;
            let success_style = Style::new().green().bold();
            println!(
                "{} Created team: {}",
                "✓".style(success_style),
                team.name.bright_white().bold()
            );
        }
        TeamSubcommand::List => {
            let teams = repo.find_teams().await?;
            display_teams(&teams);
        }
    }
    Ok(())
}
