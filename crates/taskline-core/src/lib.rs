//! # Taskline Core Library
//!
//! This library provides the business logic behind the project dashboard's
//! timeline: detecting tasks whose date ranges overlap and turning a task list
//! into the timeline page model. The `taskline-cli` binary is a thin layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Overlap detection**: pure, stateless and fail-soft; items with missing
//!   or unparseable dates are simply left out
//! - **Timeline**: Gantt bars, conflict summary and page filters built on the
//!   detector
//! - **Sources**: read-only access to tasks and projects from a JSON export or
//!   the REST API
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`OverlapDetector`]: Collection-wide warning map
//! - [`TimelineView`]: Timeline page model
//! - [`TaskSource`]: Trait for task/project providers
//! - [`Config`]: Application configuration management

pub mod date;
pub mod error;
pub mod overlap;
pub mod source;
pub mod storage;
pub mod task;
pub mod timeline;

pub use date::{format_date, parse_calendar_date};
pub use error::{ConfigError, CoreError, SourceError};
pub use overlap::{
    compute_warnings, dates_overlap, find_conflicts, has_conflicts, items_overlap, DateRange,
    DetectionStrategy, OverlapDetector, OverlapWarnings, Scheduled,
};
pub use source::{load_timeline_data, HttpSource, JsonFileSource, TaskSource};
pub use storage::Config;
pub use task::{Project, Task, TaskStatus};
pub use timeline::{ConflictLine, GanttBar, TimelineFilter, TimelineStats, TimelineView};
