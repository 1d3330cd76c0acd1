use crate::core::aggregator::aggregate;
use crate::core::parser::parse_with;
use crate::core::ranking::ranked;
use crate::core::report;
use crate::core::{ConfigProvider, LeadAnalysis, Pipeline, Record, Storage};
use crate::utils::error::Result;
use std::borrow::Cow;

pub struct LeadPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> LeadPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn source_name(&self) -> String {
        self.config.input_path().unwrap_or("<none>").to_string()
    }
}

/// UTF-8 decode with replacement characters; a leading BOM is dropped.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Cow::Owned(text) => match text.strip_prefix('\u{feff}') {
            Some(stripped) => Cow::Owned(stripped.to_string()),
            None => Cow::Owned(text),
        },
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LeadPipeline<S, C> {
    async fn extract(&self) -> Result<Option<Vec<Record>>> {
        let Some(path) = self.config.input_path() else {
            return Ok(None);
        };

        tracing::debug!("Reading lead file: {}", path);
        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        let text = decode_text(&bytes);
        Ok(Some(parse_with(&text, &self.config.parse_options())))
    }

    async fn transform(&self, records: Vec<Record>) -> Result<LeadAnalysis> {
        let stats = aggregate(&records);
        let top_locations = ranked(&stats.locations, self.config.top_n());

        Ok(LeadAnalysis {
            source: self.source_name(),
            records,
            stats,
            top_locations,
        })
    }

    async fn load(&self, analysis: LeadAnalysis) -> Result<String> {
        let format = self.config.report_format();
        tracing::debug!("Rendering {:?} report", format);
        report::render(&analysis, format)
    }
}
