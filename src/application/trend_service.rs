// Trend service - Renders every (channel, metric) figure from a finished sweep
use crate::application::figure_renderer::FigureRenderer;
use crate::domain::figure::FigureSpec;
use crate::domain::series::SeriesCollection;
use crate::infrastructure::config::OutputConfig;
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct TrendService {
    renderer: Arc<dyn FigureRenderer>,
    output: OutputConfig,
}

impl TrendService {
    pub fn new(renderer: Arc<dyn FigureRenderer>, output: OutputConfig) -> Self {
        Self { renderer, output }
    }

    /// Render all nine figures. Stops at the first failure; figures written
    /// before it stay on disk.
    pub fn render_all(&self, series: &SeriesCollection) -> anyhow::Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for spec in FigureSpec::all() {
            let path = self.output.figure_path(spec.channel, spec.metric);
            let trend = series.trend(spec.channel, spec.metric);

            self.renderer
                .render(&spec, &trend, &path)
                .with_context(|| format!("Failed to render {}", path.display()))?;

            tracing::info!("Saved {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}
