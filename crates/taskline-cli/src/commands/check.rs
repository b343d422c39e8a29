//! Check one task against its siblings.

use clap::Args;
use taskline_core::{find_conflicts, Task};

use super::input::InputArgs;

#[derive(Args)]
pub struct CheckArgs {
    /// Task ID
    task_id: String,
    #[command(flatten)]
    input: InputArgs,
    /// Compare only against tasks of this project
    #[arg(long)]
    project_id: Option<String>,
    /// Print conflicting task IDs as a JSON array
    #[arg(long)]
    json: bool,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, input) = args.input.open()?;
    let (_, tasks) = input.load(args.project_id.as_deref())?;

    let task = tasks
        .iter()
        .find(|t| t.id == args.task_id)
        .ok_or(format!("Task not found: {}", args.task_id))?;
    let conflicts = find_conflicts(task, &tasks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
        return Ok(());
    }

    if !task.has_schedule() {
        println!("Task {} has no complete schedule; nothing to compare.", task.id);
        return Ok(());
    }
    if conflicts.is_empty() {
        println!("\"{}\" has no overlapping tasks.", task.title);
        return Ok(());
    }

    println!("\"{}\" overlaps with:", task.title);
    for id in &conflicts {
        println!("  {} ({id})", title_of(&tasks, id));
    }
    Ok(())
}

fn title_of<'a>(tasks: &'a [Task], id: &'a str) -> &'a str {
    tasks
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.title.as_str())
        .filter(|title| !title.is_empty())
        .unwrap_or(id)
}
