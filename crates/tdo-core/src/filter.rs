//! Task filtering.
//!
//! Project and label constraints can be pushed to the server as query
//! parameters; priority and due-date predicates are always evaluated here.

use chrono::{DateTime, Days, Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};

use crate::error::CoreError;
use crate::models::{Priority, Task};

/// A due-date predicate normalised to a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    /// Due exactly on this date.
    On(NaiveDate),
    /// Due strictly before this date ("overdue" is `Before(today)`).
    Before(NaiveDate),
}

impl DueFilter {
    /// Resolves free text ("today", "tomorrow", "overdue", "2025-03-14",
    /// "next friday") against `now`.
    pub fn parse(input: &str, now: DateTime<Local>) -> Result<Self, CoreError> {
        let text = input.trim().to_lowercase();
        let today = now.date_naive();

        let filter = match text.as_str() {
            "" => {
                return Err(CoreError::InvalidInput(
                    "due date expression must not be empty".to_string(),
                ))
            }
            "overdue" => DueFilter::Before(today),
            "today" => DueFilter::On(today),
            "tomorrow" => DueFilter::On(
                today
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| out_of_range(input))?,
            ),
            "yesterday" => DueFilter::On(
                today
                    .checked_sub_days(Days::new(1))
                    .ok_or_else(|| out_of_range(input))?,
            ),
            _ => match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                Ok(date) => DueFilter::On(date),
                Err(_) if has_oversized_number(&text) => return Err(out_of_range(input)),
                Err(_) => parse_date_string(&text, now, Dialect::Us)
                    .map(|dt| DueFilter::On(dt.date_naive()))
                    .map_err(|e| {
                        CoreError::InvalidInput(format!(
                            "could not understand due date '{}': {}",
                            input, e
                        ))
                    })?,
            },
        };

        Ok(filter)
    }

    pub fn matches(&self, due: Option<NaiveDate>) -> bool {
        match (self, due) {
            (DueFilter::On(date), Some(due)) => due == *date,
            (DueFilter::Before(date), Some(due)) => due < *date,
            (_, None) => false,
        }
    }
}

/// chrono-english panics when an offset overflows the calendar, so
/// expressions with numbers beyond this are refused up front.
const MAX_EXPRESSION_NUMBER: u64 = 100_000;

fn has_oversized_number(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .any(|token| {
            token
                .parse::<u64>()
                .map_or(true, |n| n > MAX_EXPRESSION_NUMBER)
        })
}

fn out_of_range(input: &str) -> CoreError {
    CoreError::InvalidInput(format!("due date '{}' is out of range", input))
}

/// Constraints for `list_tasks`. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: Option<String>,
    pub label: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<DueFilter>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self == &TaskFilter::default()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(project_id) = &self.project_id {
            if &task.project_id != project_id {
                return false;
            }
        }
        if let Some(label) = &self.label {
            if !task.labels.iter().any(|l| l.eq_ignore_ascii_case(label)) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(due) = &self.due {
            if !due.matches(task.due_date()) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }
}
