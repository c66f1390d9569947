// Main entry point - Dependency injection and pipeline setup
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use bitdepth_sweep::application::sweep_service::SweepService;
use bitdepth_sweep::application::trend_service::TrendService;
use bitdepth_sweep::infrastructure::config::load_harness_config;
use bitdepth_sweep::infrastructure::plotters_renderer::PlottersRenderer;
use bitdepth_sweep::infrastructure::process_tools::ProcessTools;
use bitdepth_sweep::presentation::cli::parse_args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = parse_args();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_harness_config()?;

    // Create adapters (infrastructure layer)
    let tools = Arc::new(ProcessTools::new(config.tools));
    let renderer = Arc::new(PlottersRenderer::new(config.figure));

    // Create services (application layer)
    let sweep_service = SweepService::new(tools, config.output.clone());
    let trend_service = TrendService::new(renderer, config.output);

    // Figures are only rendered once every bit depth has been swept
    let series = sweep_service.run(&args.original).await?;
    let figures = trend_service.render_all(&series)?;

    tracing::info!("Wrote {} figures", figures.len());
    Ok(())
}
