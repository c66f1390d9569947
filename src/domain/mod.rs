// Domain layer - Sweep points, metric schema and accumulated series
pub mod figure;
pub mod metrics;
pub mod series;
pub mod sweep;
