use crate::domain::model::{AggregationResult, Record, TrackedField};
use std::borrow::Borrow;

/// Single-pass accumulator behind [`aggregate`].
#[derive(Debug, Default)]
pub struct Aggregator {
    result: AggregationResult,
    observed: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the tracked fields of one record. Absent or empty values are skipped.
    pub fn observe(&mut self, record: &Record) {
        self.observed += 1;
        for field in TrackedField::ALL {
            if let Some(value) = record.present(field.field_name()) {
                self.result.table_mut(field).increment(&value.to_string());
            }
        }
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    pub fn finish(self) -> AggregationResult {
        tracing::debug!(
            "Aggregated {} records: {} industries, {} company sizes, {} locations, {} statuses",
            self.observed,
            self.result.industries.len(),
            self.result.company_sizes.len(),
            self.result.locations.len(),
            self.result.interaction_status.len()
        );
        self.result
    }
}

/// Reduces records into the four frequency tables. Never fails.
pub fn aggregate<I>(records: I) -> AggregationResult
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    records
        .into_iter()
        .fold(Aggregator::new(), |mut aggregator, record| {
            aggregator.observe(record.borrow());
            aggregator
        })
        .finish()
}
