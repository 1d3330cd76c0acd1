use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs extract -> transform -> load for one input.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Returns the rendered report, or `None` when no input was selected.
    pub async fn run(&self) -> Result<Option<String>> {
        tracing::info!("Starting lead analysis");

        let Some(records) = self.pipeline.extract().await? else {
            tracing::info!("No input selected, nothing to analyze");
            return Ok(None);
        };
        tracing::info!("Parsed {} records", records.len());
        self.monitor.log_stats("Extract");

        let analysis = self.pipeline.transform(records).await?;
        tracing::info!(
            "Aggregated {} industries, {} company sizes, {} locations, {} statuses",
            analysis.stats.industries.len(),
            analysis.stats.company_sizes.len(),
            analysis.stats.locations.len(),
            analysis.stats.interaction_status.len()
        );
        self.monitor.log_stats("Transform");

        let report = self.pipeline.load(analysis).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(Some(report))
    }
}
