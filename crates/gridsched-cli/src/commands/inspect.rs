use std::path::Path;

use gridsched_core::{PassConfig, ReportMapping};
use gridsched_strategy::{copy_reports, sort_terminated_first};

use crate::OutputFormat;

pub fn inspect(path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = PassConfig::from_file(Path::new(path))?;
    let reports = config.reports()?;

    print!("{}", render(&reports, format)?);
    Ok(())
}

/// Render every report with terminated workloads first.
pub fn render(reports: &ReportMapping, format: OutputFormat) -> anyhow::Result<String> {
    let mut sorted = copy_reports(reports);
    for report in sorted.values_mut() {
        sort_terminated_first(report);
    }

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&sorted)? + "\n"),
        OutputFormat::Text => {
            let mut out = String::new();
            for (member, report) in &sorted {
                let terminated = report.terminated().count();
                out.push_str(&format!(
                    "{member}: {} workloads, {terminated} terminated\n",
                    report.len()
                ));
                for entry in report {
                    out.push_str(&format!("  {:<12} {}\n", entry.state(), entry.workload()));
                }
            }
            Ok(out)
        }
    }
}
