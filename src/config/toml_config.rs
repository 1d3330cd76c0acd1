use crate::core::parser::ParseOptions;
use crate::core::ranking::DEFAULT_TOP_N;
use crate::core::report::ReportFormat;
use crate::core::ConfigProvider;
use crate::utils::error::{LeadError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub report: ReportConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: Option<String>,
    pub delimiter: String,
    pub dynamic_typing: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: "auto".to_string(),
            dynamic_typing: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LeadError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEADS_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.path.as_deref()
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            delimiter: validation::parse_delimiter("input.delimiter", &self.input.delimiter)
                .ok()
                .flatten(),
            dynamic_typing: self.input.dynamic_typing,
        }
    }

    fn report_format(&self) -> ReportFormat {
        self.report.format
    }

    fn top_n(&self) -> usize {
        self.report.top_n
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.input.path {
            validation::validate_path("input.path", path)?;
            validation::validate_file_extension("input.path", path, &validation::INPUT_EXTENSIONS)?;
        }
        validation::parse_delimiter("input.delimiter", &self.input.delimiter)?;
        validation::validate_range("report.top_n", self.report.top_n, 1, validation::MAX_TOP_N)?;
        Ok(())
    }
}
