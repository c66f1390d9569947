// Sweep service - Drives quantize/compare over every bit depth
use crate::application::audio_tools::AudioTools;
use crate::application::metric_extractor::extract_metrics;
use crate::domain::metrics::MetricReading;
use crate::domain::series::SeriesCollection;
use crate::domain::sweep::BitDepth;
use crate::infrastructure::config::OutputConfig;
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct SweepService {
    tools: Arc<dyn AudioTools>,
    output: OutputConfig,
}

impl SweepService {
    pub fn new(tools: Arc<dyn AudioTools>, output: OutputConfig) -> Self {
        Self { tools, output }
    }

    /// Run the full sweep, finest bit depth first. The first tool failure
    /// aborts the sweep and nothing collected so far is returned.
    pub async fn run(&self, original: &Path) -> anyhow::Result<SeriesCollection> {
        let mut series = SeriesCollection::new();

        for bit_depth in BitDepth::sweep() {
            let reading = self.run_point(original, bit_depth).await?;
            series.record(bit_depth, &reading)?;
        }

        tracing::debug!("Sweep finished with {} points", series.len());
        Ok(series)
    }

    async fn run_point(&self, original: &Path, bit_depth: BitDepth) -> anyhow::Result<MetricReading> {
        let quantized = self.output.quantized_path(bit_depth);
        tracing::info!("Processing quantization with {} bits...", bit_depth);

        self.tools
            .quantize(original, &quantized, bit_depth.bits())
            .await
            .with_context(|| format!("Quantization to {} bits failed", bit_depth))?;

        let report = self
            .tools
            .compare(original, &quantized)
            .await
            .with_context(|| format!("Comparison at {} bits failed", bit_depth))?;

        let reading = extract_metrics(&report);
        for (channel, metric) in reading.missing() {
            tracing::warn!(
                "No {} {} in comparator report for {} bits",
                channel.report_label(),
                metric.report_label(),
                bit_depth
            );
        }
        tracing::debug!("Metrics at {} bits: {:?}", bit_depth, reading);

        Ok(reading)
    }
}
