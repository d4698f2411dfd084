use tdo_core::models::CreationReport;

use super::Theme;

/// One line for the parent, then one per subtask in creation order.
pub fn render_creation(report: &CreationReport, theme: Theme) -> String {
    let mut lines = vec![format!(
        "{} Created task: {} {}",
        theme.success("✓"),
        report.parent.content,
        theme.id(&format!("({})", report.parent.id)),
    )];

    for outcome in &report.subtasks {
        let line = match &outcome.result {
            Ok(task) => format!(
                "  {} Subtask: {} {}",
                theme.success("✓"),
                task.content,
                theme.id(&format!("({})", task.id)),
            ),
            Err(e) => format!(
                "  {} Subtask: {} failed: {}",
                theme.error("✗"),
                outcome.content,
                e
            ),
        };
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdo_core::error::CoreError;
    use tdo_core::models::{Priority, SubtaskOutcome, Task};

    fn task(id: &str, content: &str) -> Task {
        Task {
            id: id.to_string(),
            content: content.to_string(),
            description: String::new(),
            project_id: "inbox".to_string(),
            parent_id: None,
            priority: Priority::Low,
            due: None,
            labels: vec![],
            is_completed: false,
            url: String::new(),
        }
    }

    #[test]
    fn lists_every_subtask_outcome_in_order() {
        let report = CreationReport {
            parent: task("1", "X"),
            subtasks: vec![
                SubtaskOutcome {
                    content: "A".to_string(),
                    result: Ok(task("2", "A")),
                },
                SubtaskOutcome {
                    content: "B".to_string(),
                    result: Err(CoreError::Remote {
                        status: Some(500),
                        message: "boom".to_string(),
                    }),
                },
            ],
        };

        let out = render_creation(&report, Theme::new(false));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "✓ Created task: X (1)");
        assert_eq!(lines[1], "  ✓ Subtask: A (2)");
        assert_eq!(
            lines[2],
            "  ✗ Subtask: B failed: Remote service error (500): boom"
        );
        assert_eq!(lines.len(), 3);
    }
}
