//! Timeline page rendered as text or JSON.

use clap::Args;
use taskline_core::{TimelineFilter, TimelineView};

use super::input::InputArgs;

#[derive(Args)]
pub struct TimelineArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Show only tasks of this project
    #[arg(long)]
    project_id: Option<String>,
    /// Show only tasks that overlap another task
    #[arg(long)]
    overlaps_only: bool,
    /// Print the full view model as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TimelineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, input) = args.input.open()?;
    // The page loads everything and filters locally so stats cover all tasks.
    let (projects, tasks) = input.load(None)?;

    let filter = TimelineFilter {
        project_id: args.project_id,
        overlaps_only: args.overlaps_only,
    };
    let view = TimelineView::build(&tasks, &projects, &filter, &config.timeline);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_view(&view);
    Ok(())
}

fn print_view(view: &TimelineView) {
    println!("{}", view.heading);
    println!(
        "Total projects: {} | Total tasks: {} | Tasks with dates: {}",
        view.stats.total_projects, view.stats.total_tasks, view.stats.scheduled_tasks
    );

    if view.has_overlaps() {
        println!("Warning: {} task(s) have overlaps", view.stats.overlapping_tasks);
    }
    if !view.conflict_summary.is_empty() {
        println!();
        println!("Overlap warnings:");
        for line in &view.conflict_summary {
            println!("  {line}");
        }
    }

    println!();
    if view.is_empty() {
        println!("No tasks with dates found. Add start and end dates to tasks to see them on the timeline.");
        return;
    }

    println!(
        "{} task(s) | {} project(s)",
        view.stats.visible_scheduled_tasks, view.stats.visible_projects
    );
    for bar in &view.bars {
        let marker = if bar.has_overlap { " [overlap]" } else { "" };
        // Subtasks hang under their parent.
        let indent = if is_subtask(view, &bar.id) { "  - " } else { "" };
        println!(
            "  {} .. {}  {:>3}%  {}{}{}",
            bar.start_date,
            bar.end_date,
            (bar.progress * 100.0).round() as i64,
            indent,
            bar.text,
            marker
        );
    }
}

fn is_subtask(view: &TimelineView, id: &str) -> bool {
    view.tasks.iter().any(|t| t.id == id && t.is_subtask())
}
