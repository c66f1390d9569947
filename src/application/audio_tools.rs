// Port for the external quantizer and comparator
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait AudioTools: Send + Sync {
    /// Write a copy of `original` quantized to `bits` bits per sample at `output`.
    async fn quantize(&self, original: &Path, output: &Path, bits: u8) -> anyhow::Result<()>;

    /// Compare `quantized` against `original` and return the textual report.
    async fn compare(&self, original: &Path, quantized: &Path) -> anyhow::Result<String>;
}
