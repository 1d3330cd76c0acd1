pub mod aggregator;
pub mod etl;
pub mod parser;
pub mod ranking;
pub mod report;

pub use crate::domain::model::{
    AggregationResult, CellValue, FrequencyTable, LeadAnalysis, RankedEntry, Record, TrackedField,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
