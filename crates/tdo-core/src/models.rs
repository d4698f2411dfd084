use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_inbox_project: bool,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Todoist priority as sent over the wire: 1 is the lowest, 4 the highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0} (expected 1-4 or low, medium, high, urgent)")]
pub struct ParsePriorityError(String);

impl TryFrom<u8> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            4 => Ok(Priority::Urgent),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "low" => Ok(Priority::Low),
            "2" | "medium" => Ok(Priority::Medium),
            "3" | "high" => Ok(Priority::High),
            "4" | "urgent" => Ok(Priority::Urgent),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Due {
    pub date: NaiveDate,
    /// Either RFC 3339 or a floating local time, so it stays a string.
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub string: String,
    #[serde(default)]
    pub is_recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    pub project_id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub url: String,
}

impl Task {
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due.as_ref().map(|d| d.date)
    }
}

/// Body of a task creation request. Absent fields are left to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl NewTask {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// A child of `parent_id` carrying nothing but its content.
    pub fn subtask_of(parent_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: Some(parent_id.into()),
            ..Default::default()
        }
    }

    /// Attaches labels by name, dropping blanks and repeats.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            let label = label.into().trim().to_string();
            if !label.is_empty() && !self.labels.contains(&label) {
                self.labels.push(label);
            }
        }
        self
    }
}

/// Outcome of one requested subtask.
#[derive(Debug)]
pub struct SubtaskOutcome {
    pub content: String,
    pub result: Result<Task, CoreError>,
}

/// Result of creating a parent task followed by its subtasks.
#[derive(Debug)]
pub struct CreationReport {
    pub parent: Task,
    pub subtasks: Vec<SubtaskOutcome>,
}

impl CreationReport {
    pub fn failed(&self) -> impl Iterator<Item = &SubtaskOutcome> {
        self.subtasks.iter().filter(|s| s.result.is_err())
    }

    pub fn is_complete(&self) -> bool {
        self.failed().next().is_none()
    }
}
