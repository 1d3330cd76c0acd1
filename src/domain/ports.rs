use crate::core::parser::ParseOptions;
use crate::core::report::ReportFormat;
use crate::domain::model::{LeadAnalysis, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 讀取使用者選取檔案的能力
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// `None` when no file was selected.
    fn input_path(&self) -> Option<&str>;
    fn parse_options(&self) -> ParseOptions;
    fn report_format(&self) -> ReportFormat;
    fn top_n(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Returns `Ok(None)` when there is no input to analyze.
    async fn extract(&self) -> Result<Option<Vec<Record>>>;
    async fn transform(&self, records: Vec<Record>) -> Result<LeadAnalysis>;
    async fn load(&self, analysis: LeadAnalysis) -> Result<String>;
}
