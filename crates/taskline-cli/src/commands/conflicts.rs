//! Overlap warning map for a task list.

use clap::Args;
use taskline_core::timeline::conflict_summary;

use super::input::InputArgs;

#[derive(Args)]
pub struct ConflictsArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Only consider tasks of this project
    #[arg(long)]
    project_id: Option<String>,
    /// Print the raw warning map as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ConflictsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, input) = args.input.open()?;
    let (_, tasks) = input.load(args.project_id.as_deref())?;
    let warnings = config.detector().compute(&tasks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&warnings)?);
        return Ok(());
    }

    if warnings.is_empty() {
        println!("No overlapping tasks.");
        return Ok(());
    }

    println!(
        "{} task(s) have overlaps ({} overlapping pair(s))",
        warnings.len(),
        warnings.conflict_pairs().len()
    );
    for line in conflict_summary(&tasks, &warnings) {
        println!("  {line}");
    }
    Ok(())
}
