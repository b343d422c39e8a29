//! Timeline view model.
//!
//! This module provides:
//! - Gantt bars coloured by status and overlap
//! - The conflict summary panel listing each conflict by task title
//! - Page filters (project, overlapping tasks only) and counters

mod bar;
mod view;

pub use bar::{bar_color, gantt_bars, progress_percent, project_name, GanttBar};
pub use view::{conflict_summary, ConflictLine, TimelineFilter, TimelineStats, TimelineView};
