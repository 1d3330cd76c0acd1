pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::parser::ParseOptions;
#[cfg(feature = "cli")]
use crate::core::report::ReportFormat;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lead-dumpster")]
#[command(about = "Organize and analyze your leads: frequency tables from a CSV export")]
pub struct CliConfig {
    /// Lead file to analyze; nothing is reported when omitted
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Number of entries in the top locations list
    #[arg(long, default_value = "10")]
    pub top_n: usize,

    /// 'auto', 'tab' or a single character
    #[arg(long, default_value = "auto")]
    pub delimiter: String,

    /// Keep every cell as text instead of inferring numbers and booleans
    #[arg(long)]
    pub no_dynamic_typing: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            // validate() 已檢查過，這裡失敗時退回自動偵測
            delimiter: validation::parse_delimiter("delimiter", &self.delimiter)
                .ok()
                .flatten(),
            dynamic_typing: !self.no_dynamic_typing,
        }
    }

    fn report_format(&self) -> ReportFormat {
        self.format
    }

    fn top_n(&self) -> usize {
        self.top_n
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            validation::validate_path("input", input)?;
            validation::validate_file_extension("input", input, &validation::INPUT_EXTENSIONS)?;
        }
        validation::validate_range("top_n", self.top_n, 1, validation::MAX_TOP_N)?;
        validation::parse_delimiter("delimiter", &self.delimiter)?;
        Ok(())
    }
}
