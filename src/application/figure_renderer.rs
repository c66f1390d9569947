// Port for persisting one metric-vs-bit-depth figure
use crate::domain::figure::FigureSpec;
use crate::domain::series::Trend;
use std::path::Path;

pub trait FigureRenderer: Send + Sync {
    /// Draw `trend` according to `spec` and write it to `path`, replacing any
    /// existing file.
    fn render(&self, spec: &FigureSpec, trend: &Trend<'_>, path: &Path) -> anyhow::Result<()>;
}
