//! Gantt bar construction.
//!
//! Turns tasks into bars ready for a Gantt renderer. Bars are coloured by
//! status, and any task overlapping another visible task is highlighted.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::date::parse_optional_date;
use crate::overlap::{OverlapDetector, OverlapWarnings};
use crate::storage::ColorPalette;
use crate::task::{Project, Task, TaskStatus};

/// A single bar on the Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttBar {
    pub id: String,
    pub text: String,
    pub start_date: NaiveDate,
    /// Renderer end date; always after `start_date`.
    pub end_date: NaiveDate,
    /// Completion ratio, 0.0 to 1.0.
    pub progress: f64,
    pub color: String,
    pub has_overlap: bool,
    pub project_id: Option<String>,
    pub parent_id: Option<String>,
}

/// Build bars for every task with a valid start date.
///
/// `project_filter` narrows the task set and switches bar labels to plain
/// titles. Overlap flags come from warnings over the narrowed set.
pub fn gantt_bars(
    tasks: &[Task],
    projects: &[Project],
    project_filter: Option<&str>,
    detector: &OverlapDetector,
    palette: &ColorPalette,
) -> Vec<GanttBar> {
    let filtered: Vec<Task> = match project_filter {
        Some(pid) => tasks
            .iter()
            .filter(|t| t.project_id.as_deref() == Some(pid))
            .cloned()
            .collect(),
        None => tasks.to_vec(),
    };
    let warnings = detector.compute(&filtered);

    filtered
        .iter()
        .enumerate()
        .filter_map(|(index, task)| {
            build_bar(index, task, projects, project_filter.is_some(), &warnings, palette)
        })
        .collect()
}

fn build_bar(
    index: usize,
    task: &Task,
    projects: &[Project],
    plain_titles: bool,
    warnings: &OverlapWarnings,
    palette: &ColorPalette,
) -> Option<GanttBar> {
    let start = parse_optional_date(task.start_date.as_deref())?;
    let next_day = start.checked_add_days(Days::new(1))?;
    let end = parse_optional_date(task.end_date.as_deref())
        .filter(|end| *end > start)
        .unwrap_or(next_day);

    let has_overlap = warnings.contains(&task.id);
    let text = if plain_titles {
        task.title.clone()
    } else {
        format!("{} - {}", project_name(projects, task.project_id.as_deref()), task.title)
    };
    let id = if task.id.is_empty() {
        format!("task-{index}")
    } else {
        task.id.clone()
    };

    Some(GanttBar {
        id,
        text,
        start_date: start,
        end_date: end,
        progress: progress_percent(task) / 100.0,
        color: bar_color(task.status, has_overlap, palette).to_string(),
        has_overlap,
        project_id: task.project_id.clone(),
        parent_id: task.parent_task_id.clone(),
    })
}

/// Display name for a project id: the project's name, else the id, else "Unknown".
pub fn project_name(projects: &[Project], project_id: Option<&str>) -> String {
    let Some(pid) = project_id.filter(|p| !p.is_empty()) else {
        return "Unknown".to_string();
    };
    projects
        .iter()
        .find(|p| p.id == pid)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| pid.to_string())
}

/// Bar completion in percent. Zero or missing progress falls back to a
/// status default.
pub fn progress_percent(task: &Task) -> f64 {
    let reported = task.progress.filter(|p| *p > 0.0);
    match task.status {
        TaskStatus::Completed => 100.0,
        TaskStatus::InProgress => reported.unwrap_or(50.0),
        TaskStatus::Blocked => reported.unwrap_or(25.0),
        TaskStatus::NotStarted => 0.0,
    }
}

/// Overlap highlighting wins over status colour.
pub fn bar_color(status: TaskStatus, has_overlap: bool, palette: &ColorPalette) -> &str {
    if has_overlap {
        return &palette.overlap;
    }
    match status {
        TaskStatus::Completed => &palette.completed,
        TaskStatus::InProgress => &palette.in_progress,
        TaskStatus::Blocked => &palette.blocked,
        TaskStatus::NotStarted => &palette.not_started,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(s: &str) -> NaiveDate {
        crate::date::parse_calendar_date(s).unwrap()
    }

    fn projects() -> Vec<Project> {
        vec![Project::new("p1", "Apollo")]
    }

    #[test]
    fn end_date_falls_back_to_next_day() {
        let palette = ColorPalette::default();
        let tasks = vec![
            Task::new("same", "Same day").with_dates("2024-01-01", "2024-01-01"),
            Task::new("bad", "Bad end").with_dates("2024-01-01", "whenever"),
            Task::new("back", "Backwards").with_dates("2024-01-05", "2024-01-02"),
        ];
        let bars = gantt_bars(&tasks, &[], None, &OverlapDetector::new(), &palette);
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].end_date, ymd("2024-01-02"));
        assert_eq!(bars[1].end_date, ymd("2024-01-02"));
        assert_eq!(bars[2].end_date, ymd("2024-01-06"));
    }

    #[test]
    fn tasks_without_valid_start_are_skipped() {
        let mut open = Task::new("o", "Open");
        open.end_date = Some("2024-01-02".into());
        let tasks = vec![open, Task::new("s", "Start only").with_dates("2024-01-01", "")];
        let bars = gantt_bars(&tasks, &[], None, &OverlapDetector::new(), &ColorPalette::default());
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].id, "s");
        assert!(!bars[0].has_overlap);
    }

    #[test]
    fn overlapping_bars_are_yellow_and_labelled_with_project() {
        let palette = ColorPalette::default();
        let tasks = vec![
            Task::new("a", "Alpha")
                .with_project("p1")
                .with_status(TaskStatus::Completed)
                .with_dates("2024-01-01", "2024-01-05"),
            Task::new("b", "Beta")
                .with_project("p2")
                .with_dates("2024-01-05", "2024-01-07"),
            Task::new("c", "Gamma")
                .with_status(TaskStatus::Blocked)
                .with_dates("2024-02-01", "2024-02-07"),
        ];
        let bars = gantt_bars(&tasks, &projects(), None, &OverlapDetector::new(), &palette);
        assert_eq!(bars[0].text, "Apollo - Alpha");
        assert_eq!(bars[0].color, "#eab308");
        assert_eq!(bars[1].text, "p2 - Beta");
        assert!(bars[1].has_overlap);
        assert_eq!(bars[2].text, "Unknown - Gamma");
        assert_eq!(bars[2].color, "#dc2626");
        assert!((bars[2].progress - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn project_filter_narrows_overlap_detection() {
        let tasks = vec![
            Task::new("a", "Alpha").with_project("p1").with_dates("2024-01-01", "2024-01-05"),
            Task::new("b", "Beta").with_project("p2").with_dates("2024-01-02", "2024-01-03"),
        ];
        let bars = gantt_bars(
            &tasks,
            &projects(),
            Some("p1"),
            &OverlapDetector::new(),
            &ColorPalette::default(),
        );
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].text, "Alpha");
        assert!(!bars[0].has_overlap);
        assert_eq!(bars[0].color, "#9ca3af");
    }

    #[test]
    fn progress_defaults_by_status() {
        let base = Task::new("a", "A");
        assert_eq!(progress_percent(&base), 0.0);
        assert_eq!(progress_percent(&base.clone().with_status(TaskStatus::InProgress)), 50.0);
        assert_eq!(
            progress_percent(&base.clone().with_status(TaskStatus::InProgress).with_progress(70.0)),
            70.0
        );
        assert_eq!(
            progress_percent(&base.clone().with_status(TaskStatus::Blocked).with_progress(0.0)),
            25.0
        );
        assert_eq!(
            progress_percent(&base.with_status(TaskStatus::Completed).with_progress(10.0)),
            100.0
        );
    }

    #[test]
    fn missing_id_gets_positional_id() {
        let tasks = vec![Task::new("", "Anonymous").with_dates("2024-01-01", "2024-01-03")];
        let bars = gantt_bars(&tasks, &[], None, &OverlapDetector::new(), &ColorPalette::default());
        assert_eq!(bars[0].id, "task-0");
    }
}
