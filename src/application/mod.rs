// Application layer - Sweep, extraction and rendering use cases
pub mod audio_tools;
pub mod figure_renderer;
pub mod metric_extractor;
pub mod sweep_service;
pub mod trend_service;
