use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use tdo_core::models::{Label, Priority, Project, Task};

/// Orders tasks so each subtask follows its parent, with its nesting depth.
fn nest(tasks: &[Task]) -> Vec<(usize, &Task)> {
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let mut children: HashMap<&str, Vec<&Task>> = HashMap::new();
    let mut roots = Vec::new();

    for task in tasks {
        match task.parent_id.as_deref() {
            Some(parent) if ids.contains(parent) && parent != task.id => {
                children.entry(parent).or_default().push(task)
            }
            _ => roots.push(task),
        }
    }

    let mut ordered = Vec::with_capacity(tasks.len());
    let mut seen = HashSet::new();
    let mut stack: Vec<(usize, &Task)> = roots.into_iter().rev().map(|t| (0, t)).collect();
    while let Some((depth, task)) = stack.pop() {
        if !seen.insert(task.id.as_str()) {
            continue;
        }
        ordered.push((depth, task));
        if let Some(kids) = children.get(task.id.as_str()) {
            stack.extend(kids.iter().rev().map(|k| (depth + 1, *k)));
        }
    }

    // Parent cycles leave tasks unreachable from any root; show them flat.
    for task in tasks {
        if seen.insert(task.id.as_str()) {
            ordered.push((0, task));
        }
    }
    ordered
}

fn due_cell(task: &Task, today: NaiveDate, colors: bool) -> Cell {
    let Some(due) = &task.due else {
        return Cell::new("-");
    };

    let days = (due.date - today).num_days();
    let relative = if days == 0 {
        "today".to_string()
    } else {
        HumanTime::from(Duration::days(days)).to_string()
    };
    let mut text = format!("{} ({})", due.date.format("%Y-%m-%d"), relative);
    if due.is_recurring {
        text.push_str(" ↻");
    }

    let cell = Cell::new(text);
    if !colors {
        return cell;
    }
    match days {
        d if d < 0 => cell.fg(Color::Red),
        0 => cell.fg(Color::Yellow),
        _ => cell,
    }
}

fn priority_cell(priority: Priority, colors: bool) -> Cell {
    let cell = Cell::new(priority.label());
    if !colors {
        return cell;
    }
    match priority {
        Priority::Urgent => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        Priority::High => cell.fg(Color::Yellow),
        Priority::Medium => cell.fg(Color::Blue),
        Priority::Low => cell,
    }
}

pub fn render_tasks(tasks: &[Task], projects: &[Project], today: NaiveDate, colors: bool) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let project_names: HashMap<&str, &str> = projects
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Due", "Priority", "Project", "Labels"]);

    for (depth, task) in nest(tasks) {
        let mut row = Row::new();

        let id_cell = Cell::new(&task.id);
        row.add_cell(if colors { id_cell.fg(Color::DarkGrey) } else { id_cell });

        let content = format!("{}{}", "  ".repeat(depth), task.content);
        let mut content_cell = Cell::new(content);
        if colors {
            content_cell = if task.is_completed {
                content_cell.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey)
            } else {
                content_cell.add_attribute(Attribute::Bold)
            };
        }
        row.add_cell(content_cell);

        row.add_cell(due_cell(task, today, colors));
        row.add_cell(priority_cell(task.priority, colors));

        let project = project_names
            .get(task.project_id.as_str())
            .copied()
            .unwrap_or(task.project_id.as_str());
        let project_cell = Cell::new(project);
        row.add_cell(if colors { project_cell.fg(Color::Green) } else { project_cell });

        row.add_cell(Cell::new(if task.labels.is_empty() {
            "-".to_string()
        } else {
            task.labels.join(", ")
        }));
        table.add_row(row);
    }

    table.to_string()
}

pub fn render_projects(projects: &[Project], colors: bool) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Order"]);

    for project in projects {
        let mut name = project.name.clone();
        if project.is_inbox_project {
            name.push_str(" (Inbox)");
        }
        if project.is_favorite {
            name.push_str(" ★");
        }

        let mut row = Row::new();
        row.add_cell(Cell::new(&project.id));
        let name_cell = Cell::new(name);
        row.add_cell(if colors {
            name_cell.fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            name_cell
        });
        row.add_cell(Cell::new(project.order));
        table.add_row(row);
    }

    table.to_string()
}

pub fn render_labels(labels: &[Label], colors: bool) -> String {
    if labels.is_empty() {
        return "No labels found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);

    for label in labels {
        let mut row = Row::new();
        row.add_cell(Cell::new(&label.id));
        let name_cell = Cell::new(&label.name);
        row.add_cell(if colors {
            name_cell.fg(Color::Magenta).add_attribute(Attribute::Bold)
        } else {
            name_cell
        });
        table.add_row(row);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdo_core::models::Due;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, content: &str, parent: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            content: content.to_string(),
            description: String::new(),
            project_id: "p1".to_string(),
            parent_id: parent.map(str::to_string),
            priority: Priority::Low,
            due: None,
            labels: vec![],
            is_completed: false,
            url: String::new(),
        }
    }

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            order: 1,
            is_inbox_project: false,
            is_favorite: false,
        }
    }

    #[test]
    fn subtasks_follow_their_parent() {
        let tasks = vec![
            task("2", "A", Some("1")),
            task("3", "Other", None),
            task("1", "X", None),
            task("4", "B", Some("1")),
            task("5", "Orphan", Some("missing")),
        ];
        let order: Vec<(usize, &str)> = nest(&tasks)
            .into_iter()
            .map(|(d, t)| (d, t.content.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(0, "Other"), (0, "X"), (1, "A"), (1, "B"), (0, "Orphan")]
        );
    }

    #[test]
    fn parent_cycles_do_not_lose_tasks() {
        let tasks = vec![task("1", "A", Some("2")), task("2", "B", Some("1"))];
        assert_eq!(nest(&tasks).len(), 2);
    }

    #[test]
    fn plain_rendering_has_no_escape_codes_and_resolves_projects() {
        let mut urgent = task("1", "Pay rent", None);
        urgent.priority = Priority::Urgent;
        urgent.labels = vec!["home".to_string(), "money".to_string()];
        urgent.due = Some(Due {
            date: date(2025, 3, 10),
            datetime: None,
            string: "every 10th".to_string(),
            is_recurring: true,
        });
        let mut unknown_project = task("2", "Stray", None);
        unknown_project.project_id = "p9".to_string();

        let out = render_tasks(
            &[urgent, unknown_project],
            &[project("p1", "Household")],
            date(2025, 3, 14),
            false,
        );

        assert!(!out.contains('\u{1b}'));
        assert!(out.contains("Pay rent"));
        assert!(out.contains("Urgent"));
        assert!(out.contains("2025-03-10"));
        assert!(out.contains("Household"));
        assert!(out.contains("p9"));
        assert!(out.contains("home, money"));
    }

    #[test]
    fn empty_lists_render_a_message() {
        assert_eq!(render_tasks(&[], &[], date(2025, 3, 14), true), "No tasks found.");
        assert_eq!(render_projects(&[], true), "No projects found.");
        assert_eq!(render_labels(&[], true), "No labels found.");
    }

    #[test]
    fn projects_and_labels_render_names() {
        let mut inbox = project("1", "Inbox");
        inbox.is_inbox_project = true;
        let out = render_projects(&[inbox, project("2", "Work")], false);
        assert!(out.contains("Inbox (Inbox)"));
        assert!(out.contains("Work"));

        let out = render_labels(
            &[Label {
                id: "7".to_string(),
                name: "errand".to_string(),
                order: 1,
                is_favorite: false,
            }],
            false,
        );
        assert!(out.contains("errand"));
    }
}
