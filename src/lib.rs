pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::app::pipelines::LeadPipeline;
pub use crate::config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::core::aggregator::aggregate;
pub use crate::core::parser::{parse, parse_with, ParseOptions};
pub use crate::core::ranking::{top_n, DEFAULT_TOP_N};
pub use crate::core::report::ReportFormat;
pub use crate::core::{etl::EtlEngine, AggregationResult, CellValue, FrequencyTable, Record};
pub use crate::utils::error::{LeadError, Result};

/// Raw text in, frequency tables out.
pub fn analyze(raw_text: &str) -> AggregationResult {
    aggregate(parse(raw_text))
}
