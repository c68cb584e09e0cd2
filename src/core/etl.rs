use crate::core::Pipeline;
use crate::domain::model::LoadSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

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

    pub async fn run(&self) -> Result<LoadSummary> {
        tracing::info!("🚀 Starting report workflow");
        self.monitor.log_stats("Start");

        // Extract
        let roster = self.pipeline.extract().await?;
        tracing::info!("Extracted {} children", roster.len());
        self.monitor.log_stats("Extract");

        // Transform
        let bundle = self.pipeline.transform(roster).await?;
        tracing::info!(
            "Created {} daily overview files and {} statistics files",
            bundle.daily_overviews.len(),
            bundle.statistics.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let summary = self.pipeline.load(bundle).await?;
        tracing::info!("Uploaded {} files", summary.uploaded.len());
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(summary)
    }
}
