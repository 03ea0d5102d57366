use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};

pub fn parse_due_date(date_str: &str) -> Result<DateTime<Utc>> {
    parse_date_string(date_str, Utc::now(), Dialect::Us)
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}

/// Parse a days-of-week list like "mon,wed,fri" into numeric weekdays
/// (Sunday = 0).
pub fn parse_days_of_week(days_str: &str) -> Result<Vec<u8>> {
    let input = days_str.trim().to_lowercase();

    // Day groups first
    match input.as_str() {
        "weekdays" | "workdays" => return Ok(vec![1, 2, 3, 4, 5]),
        "weekends" => return Ok(vec![0, 6]),
        _ => {}
    }

    let mut days = Vec::new();
    let mut invalid = Vec::new();

    for day in input.split(',') {
        let day = day.trim();
        if day.is_empty() {
            continue;
        }

        let number = match day {
            "sun" | "sunday" | "su" => 0,
            "mon" | "monday" | "m" => 1,
            "tue" | "tuesday" | "tu" => 2,
            "wed" | "wednesday" | "w" => 3,
            "thu" | "thursday" | "th" => 4,
            "fri" | "friday" | "f" => 5,
            "sat" | "saturday" | "sa" => 6,
            _ => {
                invalid.push(day.to_string());
                continue;
            }
        };

        if !days.contains(&number) {
            days.push(number);
        }
    }

    if !invalid.is_empty() {
        return Err(anyhow::anyhow!(
            "Invalid day(s): {}\n\nSupported formats:\n  • Full names: 'monday,wednesday,friday'\n  • Short names: 'mon,wed,fri'\n  • Groups: 'weekdays', 'weekends'",
            invalid.join(", ")
        ));
    }

    if days.is_empty() {
        return Err(anyhow::anyhow!(
            "No valid days specified in: '{}'\n\nExamples:\n  • mon,wed,fri\n  • weekdays",
            days_str
        ));
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_day_names() {
        assert_eq!(parse_days_of_week("mon,wed,fri").unwrap(), vec![1, 3, 5]);
    }

    #[test]
    fn parses_day_groups() {
        assert_eq!(parse_days_of_week("weekdays").unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(parse_days_of_week("weekends").unwrap(), vec![0, 6]);
    }

    #[test]
    fn deduplicates_days() {
        assert_eq!(parse_days_of_week("mon,monday,m").unwrap(), vec![1]);
    }

    #[test]
    fn rejects_unknown_days() {
        assert!(parse_days_of_week("mon,funday").is_err());
        assert!(parse_days_of_week("").is_err());
    }
}
