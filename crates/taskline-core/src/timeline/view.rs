//! Timeline page model: filters, statistics and the conflict summary panel.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::bar::{gantt_bars, project_name, GanttBar};
use crate::overlap::OverlapWarnings;
use crate::storage::TimelineConfig;
use crate::task::{Project, Task};

/// What the timeline shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineFilter {
    /// Only tasks of this project.
    pub project_id: Option<String>,
    /// Only tasks that conflict with something.
    pub overlaps_only: bool,
}

impl TimelineFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_overlaps_only(mut self, overlaps_only: bool) -> Self {
        self.overlaps_only = overlaps_only;
        self
    }

    fn accepts(&self, task: &Task, warnings: &OverlapWarnings) -> bool {
        if let Some(pid) = self.project_id.as_deref().filter(|p| !p.is_empty()) {
            if task.project_id.as_deref() != Some(pid) {
                return false;
            }
        }
        !self.overlaps_only || warnings.contains(&task.id)
    }
}

/// Counters shown under the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimelineStats {
    pub total_projects: usize,
    pub total_tasks: usize,
    /// Tasks with both dates present and valid.
    pub scheduled_tasks: usize,
    /// Tasks with at least one conflict.
    pub overlapping_tasks: usize,
    /// Visible tasks with a complete schedule.
    pub visible_scheduled_tasks: usize,
    /// Distinct project ids among visible tasks.
    pub visible_projects: usize,
}

/// One line of the conflict summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictLine {
    pub task_id: String,
    pub title: String,
    /// Titles of conflicting tasks, or their ids when unknown.
    pub overlaps_with: Vec<String>,
}

impl fmt::Display for ConflictLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" overlaps with: ", self.title)?;
        for (i, other) in self.overlaps_with.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{other}\"")?;
        }
        Ok(())
    }
}

/// Everything the timeline page renders, derived from tasks and projects.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineView {
    pub heading: String,
    pub stats: TimelineStats,
    /// Warning map over all tasks, independent of the filter.
    pub warnings: OverlapWarnings,
    /// Empty when the filter shows overlapping tasks only.
    pub conflict_summary: Vec<ConflictLine>,
    pub tasks: Vec<Task>,
    pub bars: Vec<GanttBar>,
}

impl TimelineView {
    /// Build the page model.
    pub fn build(
        tasks: &[Task],
        projects: &[Project],
        filter: &TimelineFilter,
        settings: &TimelineConfig,
    ) -> Self {
        let detector = crate::overlap::OverlapDetector::new().with_strategy(settings.strategy);
        let warnings = detector.compute(tasks);

        let visible: Vec<Task> = tasks
            .iter()
            .filter(|t| filter.accepts(t, &warnings))
            .cloned()
            .collect();

        let project_filter = filter.project_id.as_deref().filter(|p| !p.is_empty());
        let bars = gantt_bars(&visible, projects, project_filter, &detector, &settings.colors);

        let conflict_summary = if filter.overlaps_only {
            Vec::new()
        } else {
            conflict_summary(tasks, &warnings)
        };

        let visible_projects: BTreeSet<Option<&str>> =
            visible.iter().map(|t| t.project_id.as_deref()).collect();
        let stats = TimelineStats {
            total_projects: projects.len(),
            total_tasks: tasks.len(),
            scheduled_tasks: tasks.iter().filter(|t| t.has_schedule()).count(),
            overlapping_tasks: warnings.len(),
            visible_scheduled_tasks: visible.iter().filter(|t| t.has_schedule()).count(),
            visible_projects: visible_projects.len(),
        };

        let heading = match project_filter {
            Some(pid) => format!("Timeline: {}", project_name(projects, Some(pid))),
            None => "Timeline View - All Projects".to_string(),
        };

        tracing::debug!(
            tasks = tasks.len(),
            visible = visible.len(),
            bars = bars.len(),
            overlapping = warnings.len(),
            "built timeline view"
        );

        Self {
            heading,
            stats,
            warnings,
            conflict_summary,
            tasks: visible,
            bars,
        }
    }

    /// True when no visible task has a complete schedule.
    pub fn is_empty(&self) -> bool {
        self.stats.visible_scheduled_tasks == 0
    }

    pub fn has_overlaps(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Describe every warning entry by task title.
///
/// Entries whose task is not in `tasks` are skipped; unknown or untitled
/// partners are shown by id.
pub fn conflict_summary(tasks: &[Task], warnings: &OverlapWarnings) -> Vec<ConflictLine> {
    let find = |id: &str| tasks.iter().find(|t| t.id == id);

    warnings
        .iter()
        .filter_map(|(task_id, others)| {
            let task = find(task_id.as_str())?;
            let overlaps_with = others
                .iter()
                .map(|id| match find(id.as_str()) {
                    Some(other) if !other.title.is_empty() => other.title.clone(),
                    _ => id.clone(),
                })
                .collect();
            Some(ConflictLine {
                task_id: task_id.clone(),
                title: task.title.clone(),
                overlaps_with,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::DetectionStrategy;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("a", "Alpha").with_project("p1").with_dates("2024-01-01", "2024-01-05"),
            Task::new("b", "Beta").with_project("p2").with_dates("2024-01-05", "2024-01-09"),
            Task::new("c", "Gamma").with_project("p1").with_dates("2024-03-01", "2024-03-02"),
            Task::new("d", "Delta").with_project("p1"),
        ]
    }

    fn projects() -> Vec<Project> {
        vec![Project::new("p1", "Apollo"), Project::new("p2", "Gemini")]
    }

    #[test]
    fn unfiltered_view_has_summary_and_stats() {
        let view = TimelineView::build(
            &tasks(),
            &projects(),
            &TimelineFilter::new(),
            &TimelineConfig::default(),
        );
        assert_eq!(view.heading, "Timeline View - All Projects");
        assert_eq!(view.stats.total_projects, 2);
        assert_eq!(view.stats.total_tasks, 4);
        assert_eq!(view.stats.scheduled_tasks, 3);
        assert_eq!(view.stats.overlapping_tasks, 2);
        assert_eq!(view.stats.visible_projects, 2);
        assert_eq!(view.bars.len(), 3);
        assert_eq!(view.conflict_summary.len(), 2);
        assert_eq!(
            view.conflict_summary[0].to_string(),
            "\"Alpha\" overlaps with: \"Beta\""
        );
        assert!(view.has_overlaps());
        assert!(!view.is_empty());
    }

    #[test]
    fn overlaps_only_hides_summary_and_quiet_tasks() {
        let filter = TimelineFilter::new().with_overlaps_only(true);
        let view = TimelineView::build(&tasks(), &projects(), &filter, &TimelineConfig::default());
        let ids: Vec<&str> = view.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(view.conflict_summary.is_empty());
        assert!(view.bars.iter().all(|b| b.has_overlap));
    }

    #[test]
    fn project_filter_keeps_page_level_warnings() {
        let filter = TimelineFilter::new().with_project("p1");
        let view = TimelineView::build(&tasks(), &projects(), &filter, &TimelineConfig::default());
        assert_eq!(view.heading, "Timeline: Apollo");
        assert_eq!(view.tasks.len(), 3);
        // The page map still knows about the cross-project conflict...
        assert!(view.warnings.contains(&"a".to_string()));
        // ...but bars only flag conflicts among visible tasks.
        assert!(view.bars.iter().all(|b| !b.has_overlap));
        assert_eq!(view.bars[0].text, "Alpha");
    }

    #[test]
    fn project_and_overlap_filters_combine() {
        let filter = TimelineFilter::new().with_project("p1").with_overlaps_only(true);
        let view = TimelineView::build(&tasks(), &projects(), &filter, &TimelineConfig::default());
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].id, "a");
    }

    #[test]
    fn empty_when_nothing_is_scheduled() {
        let tasks = vec![Task::new("x", "X"), Task::new("y", "Y").with_dates("2024-01-01", "?")];
        let view = TimelineView::build(&tasks, &[], &TimelineFilter::new(), &TimelineConfig::default());
        assert!(view.is_empty());
        assert!(!view.has_overlaps());
        assert_eq!(view.stats.scheduled_tasks, 0);
    }

    #[test]
    fn sweep_line_setting_yields_same_view() {
        let settings = TimelineConfig {
            strategy: DetectionStrategy::SweepLine,
            ..TimelineConfig::default()
        };
        let sweep = TimelineView::build(&tasks(), &projects(), &TimelineFilter::new(), &settings);
        let pairwise = TimelineView::build(
            &tasks(),
            &projects(),
            &TimelineFilter::new(),
            &TimelineConfig::default(),
        );
        assert_eq!(sweep.warnings, pairwise.warnings);
        assert_eq!(sweep.conflict_summary, pairwise.conflict_summary);
        assert_eq!(sweep.bars, pairwise.bars);
    }

    #[test]
    fn summary_falls_back_to_ids() {
        let tasks = vec![
            Task::new("a", "Alpha").with_dates("2024-01-01", "2024-01-05"),
            Task::new("b", "").with_dates("2024-01-02", "2024-01-03"),
        ];
        let warnings = crate::overlap::compute_warnings(&tasks);
        let lines = conflict_summary(&tasks, &warnings);
        assert_eq!(lines[0].overlaps_with, vec!["b".to_string()]);
        assert_eq!(lines[1].to_string(), "\"\" overlaps with: \"Alpha\"");
    }
}
