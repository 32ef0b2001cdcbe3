use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completion state of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Incomplete,
    Complete,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOMPLETE" => Ok(Status::Incomplete),
            "COMPLETE" => Ok(Status::Complete),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Repeat schedule for a task, bounded by a validity window in epoch seconds.
/// An `end_date` of zero means open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecurringRule {
    pub cron_expression: String,
    #[serde(default)]
    pub start_date: i64,
    #[serde(default)]
    pub end_date: i64,
}

impl RecurringRule {
    pub fn validate(&self) -> Result<(), String> {
        if !crate::schedule::is_valid_schedule(&self.cron_expression) {
            return Err("invalid cron expression".to_string());
        }
        if self.end_date != 0 && self.end_date < self.start_date {
            return Err("end date precedes start date".to_string());
        }
        Ok(())
    }
}

/// A stored task. `id` and `owner` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub owner: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Parent task ids. Not checked for cycles.
    #[serde(default)]
    pub parents: Vec<String>,
    pub due_date: Option<i64>,
    pub recurring_rule: Option<RecurringRule>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Task {
    pub fn new(id: String, owner: String, title: String) -> Self {
        Self {
            id,
            owner,
            title,
            description: String::new(),
            status: Status::Incomplete,
            tags: BTreeSet::new(),
            parents: Vec::new(),
            due_date: None,
            recurring_rule: None,
            created_at: 0,
            updated_at: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        assert_eq!("COMPLETE".parse::<Status>().unwrap(), Status::Complete);
        assert_eq!("INCOMPLETE".parse::<Status>().unwrap(), Status::default());
        assert!("done".parse::<Status>().is_err());
        assert_eq!(serde_json::to_value(Status::Complete).unwrap(), "COMPLETE");
    }

    #[test]
    fn recurring_rule_window() {
        let mut rule = RecurringRule { cron_expression: "0 9 * * MON-FRI".into(), start_date: 100, end_date: 0 };
        assert!(rule.validate().is_ok());
        rule.end_date = 50;
        assert!(rule.validate().is_err());
        rule.end_date = 200;
        rule.cron_expression = "every tuesday".into();
        assert_eq!(rule.validate().unwrap_err(), "invalid cron expression");
    }
}
