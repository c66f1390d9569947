// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod plotters_renderer;
pub mod process_tools;
