use crate::args::OutputFormat;
use crate::domain::{ProvisionReport, StepStatus};
use crate::errors::Result;

/// Render the final report for stdout.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render(report: &ProvisionReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &ProvisionReport) -> String {
    let mut lines = vec![format!(
        "Summary for bucket {} in {}:",
        report.bucket, report.region
    )];
    for entry in &report.steps {
        let line = match &entry.status {
            StepStatus::Succeeded => format!("  {}: ok", entry.step),
            StepStatus::Skipped { reason } => format!("  {}: skipped ({reason})", entry.step),
            StepStatus::Failed { error } => format!("  {}: FAILED ({error})", entry.step),
        };
        lines.push(line);
    }
    let failed = report.failures().count();
    if failed > 0 {
        lines.push(format!("{failed} step(s) failed; re-run to retry."));
    }
    lines.join("\n")
}
