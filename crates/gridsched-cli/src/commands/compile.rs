use std::path::Path;

use gridsched_core::{InstructionMap, PassConfig};
use gridsched_strategy::SchedulerStrategyContext;
use tracing::debug;

use crate::OutputFormat;

pub fn compile(path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = PassConfig::from_file(Path::new(path))?;
    let context = SchedulerStrategyContext::from_pass(&config)?;
    let batches = context.to_instruction_map();
    debug!(path, batches = batches.len(), "compiled pass file");

    print!("{}", render(&batches, format)?);
    Ok(())
}

pub fn render(batches: &[InstructionMap], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(batches)? + "\n"),
        OutputFormat::Text => Ok(format_batches(batches)),
    }
}

fn format_batches(batches: &[InstructionMap]) -> String {
    if batches.is_empty() {
        return "nothing to dispatch\n".to_string();
    }

    let mut out = String::new();
    for (index, batch) in batches.iter().enumerate() {
        out.push_str(&format!("batch {} ({} members)\n", index + 1, batch.len()));
        for (member, instruction) in batch {
            out.push_str(&format!("  {member}\n"));
            for action in instruction.iter() {
                out.push_str(&format!("    {action}\n"));
            }
        }
    }
    out
}
