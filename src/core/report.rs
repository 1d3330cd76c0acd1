use crate::domain::model::{AggregationResult, LeadAnalysis, RankedEntry, TrackedField};
use crate::utils::error::{LeadError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
    Tsv,
}

/// 文字報表的區塊順序，與原本頁面一致
const TEXT_SECTIONS: [TrackedField; 3] = [
    TrackedField::Industry,
    TrackedField::CompanySize,
    TrackedField::Status,
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    source: &'a str,
    generated_at: String,
    record_count: usize,
    stats: &'a AggregationResult,
    top_locations: &'a [RankedEntry],
}

pub fn render(analysis: &LeadAnalysis, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(analysis)),
        ReportFormat::Json => render_json(analysis),
        ReportFormat::Csv => render_delimited(analysis, b','),
        ReportFormat::Tsv => render_delimited(analysis, b'\t'),
    }
}

fn render_text(analysis: &LeadAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Lead summary for {}", analysis.source);
    let _ = writeln!(out, "Records: {}", analysis.record_count());

    for field in TEXT_SECTIONS {
        let table = analysis.stats.table(field);
        let _ = writeln!(out, "\n{}", field.title());
        if table.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for (category, count) in table.iter() {
            let _ = writeln!(out, "  {:<32} {:>6}", category, count);
        }
    }

    let _ = writeln!(out, "\nTop Locations");
    if analysis.top_locations.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for entry in &analysis.top_locations {
        let _ = writeln!(out, "  {:<32} {:>6}", entry.category, entry.count);
    }

    out
}

fn render_json(analysis: &LeadAnalysis) -> Result<String> {
    let report = JsonReport {
        source: &analysis.source,
        generated_at: chrono::Utc::now().to_rfc3339(),
        record_count: analysis.record_count(),
        stats: &analysis.stats,
        top_locations: &analysis.top_locations,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_delimited(analysis: &LeadAnalysis, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["table", "category", "count"])?;
    for (field, table) in analysis.stats.tables() {
        for (category, count) in table.iter() {
            writer.write_record([field.table_name(), category, count.to_string().as_str()])?;
        }
    }
    for entry in &analysis.top_locations {
        writer.write_record([
            "topLocations",
            entry.category.as_str(),
            entry.count.to_string().as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LeadError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LeadError::ProcessingError {
        message: format!("Report is not valid UTF-8: {}", e),
    })
}
