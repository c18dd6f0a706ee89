use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use wordfreq_engine::Report;

use crate::cli::OutputFormat;

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    generated_utc: String,
    input: &'a Path,
    report: &'a Report,
}

pub fn render(report: &Report, input: &Path, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => {
            let envelope = JsonEnvelope {
                generated_utc: Utc::now().to_rfc3339(),
                input,
                report,
            };
            let mut text = serde_json::to_string_pretty(&envelope)?;
            text.push('\n');
            Ok(text)
        }
    }
}
