use chrono::Utc;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use std::collections::HashMap;
use taskhive_core::models::{Project, SeriesInfo, Task, TaskPriority, TaskStatus, Team};
use uuid::Uuid;

pub fn display_tasks(tasks: &[Task], project_names: &HashMap<Uuid, String>) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Status", "Priority", "Due Date", "Project"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(&task.id.to_string()[..8]));

        let mut display_title = String::new();
        if task.series_id.is_some() {
            display_title.push('↻');
            display_title.push(' ');
        }
        display_title.push_str(&task.title);

        let mut title_cell = Cell::new(display_title);
        match task.status {
            TaskStatus::Done => {
                title_cell = title_cell
                    .add_attribute(Attribute::CrossedOut)
                    .fg(Color::DarkGrey);
            }
            TaskStatus::Todo | TaskStatus::InProgress => {
                title_cell = match task.priority {
                    TaskPriority::High => {
                        title_cell.fg(Color::Red).add_attribute(Attribute::Bold)
                    }
                    TaskPriority::Medium => title_cell.fg(Color::Yellow),
                    TaskPriority::Low => title_cell.fg(Color::Green),
                };
            }
        }
        row.add_cell(title_cell);

        let mut status_cell = Cell::new(task.status.to_string());
        status_cell = match task.status {
            TaskStatus::Done => status_cell.fg(Color::Green),
            TaskStatus::InProgress => status_cell.fg(Color::Cyan),
            TaskStatus::Todo => status_cell,
        };
        row.add_cell(status_cell);

        row.add_cell(Cell::new(task.priority.to_string()));

        let due_date_cell = if let Some(due_date) = task.due_date {
            let now = Utc::now();
            let formatted = due_date.format("%Y-%m-%d %H:%M").to_string();
            if task.status != TaskStatus::Done && due_date < now {
                Cell::new(formatted).fg(Color::Red) // Overdue
            } else if due_date.date_naive() == now.date_naive() {
                Cell::new(formatted).fg(Color::Yellow) // Due today
            } else {
                Cell::new(formatted)
            }
        } else {
            Cell::new("None")
        };
        row.add_cell(due_date_cell);

        let project = task
            .project_id
            .and_then(|id| project_names.get(&id))
            .map(String::as_str)
            .unwrap_or("None");
        row.add_cell(Cell::new(project));

        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_teams(teams: &[Team]) {
    if teams.is_empty() {
        println!("No teams found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Created At"]);

    for team in teams {
        let mut row = Row::new();
        row.add_cell(Cell::new(&team.id.to_string()[..8]));
        row.add_cell(Cell::new(&team.name));
        row.add_cell(Cell::new(team.created_at.format("%Y-%m-%d").to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Created At"]);

    for project in projects {
        let mut row = Row::new();
        row.add_cell(Cell::new(&project.id.to_string()[..8]));
        row.add_cell(Cell::new(&project.name));
        row.add_cell(Cell::new(project.created_at.format("%Y-%m-%d").to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_series_info(info: &SeriesInfo) {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);

    let series = &info.series;
    table.add_row(vec![
        Cell::new("Task"),
        Cell::new(&info.title),
    ]);
    if let Some(description) = &info.description {
        table.add_row(vec![Cell::new("Description"), Cell::new(description)]);
    }
    table.add_row(vec![
        Cell::new("Priority"),
        Cell::new(info.priority.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Frequency"),
        Cell::new(series.frequency.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Interval"),
        Cell::new(series.interval.to_string()),
    ]);
    if !series.days_of_week.0.is_empty() {
        let names = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];
        let days = series
            .days_of_week
            .0
            .iter()
            .map(|&d| names.get(d as usize).copied().unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![Cell::new("Days"), Cell::new(days)]);
    }
    if let Some(day_of_month) = series.day_of_month {
        table.add_row(vec![
            Cell::new("Day of month"),
            Cell::new(day_of_month.to_string()),
        ]);
    }
    if let Some(end_date) = series.end_date {
        table.add_row(vec![
            Cell::new("Ends"),
            Cell::new(end_date.format("%Y-%m-%d").to_string()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Next occurrence"),
        Cell::new(series.next_due_date.format("%Y-%m-%d %H:%M").to_string()),
    ]);
    let status_cell = if series.active {
        Cell::new("active").fg(Color::Green)
    } else {
        Cell::new("stopped").fg(Color::DarkGrey)
    };
    table.add_row(vec![Cell::new("Status"), status_cell]);

    println!("{table}");
}
