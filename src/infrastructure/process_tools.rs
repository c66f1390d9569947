// External tool adapter - runs the quantizer and comparator as child processes
use crate::application::audio_tools::AudioTools;
use crate::infrastructure::config::{ToolCommand, ToolsConfig};
use async_trait::async_trait;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to launch {tool} ({program})")]
    Launch {
        tool: &'static str,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    Failed { tool: &'static str, status: ExitStatus },
}

#[derive(Debug, Clone)]
pub struct ProcessTools {
    quantizer: ToolCommand,
    comparator: ToolCommand,
}

impl ProcessTools {
    pub fn new(config: ToolsConfig) -> Self {
        Self {
            quantizer: config.quantizer,
            comparator: config.comparator,
        }
    }

    fn command(tool: &ToolCommand) -> Command {
        let mut cmd = Command::new(&tool.program);
        cmd.args(&tool.args).stdin(Stdio::null()).stderr(Stdio::inherit());
        cmd
    }

    fn launch_error(name: &'static str, tool: &ToolCommand, source: std::io::Error) -> ToolError {
        ToolError::Launch {
            tool: name,
            program: tool.program.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl AudioTools for ProcessTools {
    async fn quantize(&self, original: &Path, output: &Path, bits: u8) -> anyhow::Result<()> {
        let mut cmd = Self::command(&self.quantizer);
        cmd.arg(original)
            .arg(output)
            .arg(bits.to_string())
            .stdout(Stdio::inherit());
        tracing::debug!("Running {:?}", cmd.as_std());

        let status = cmd
            .status()
            .await
            .map_err(|e| Self::launch_error("quantizer", &self.quantizer, e))?;

        if !status.success() {
            return Err(ToolError::Failed {
                tool: "quantizer",
                status,
            }
            .into());
        }

        Ok(())
    }

    async fn compare(&self, original: &Path, quantized: &Path) -> anyhow::Result<String> {
        let mut cmd = Self::command(&self.comparator);
        cmd.arg(original).arg(quantized).stdout(Stdio::piped());
        tracing::debug!("Running {:?}", cmd.as_std());

        let output = cmd
            .output()
            .await
            .map_err(|e| Self::launch_error("comparator", &self.comparator, e))?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                tool: "comparator",
                status: output.status,
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::application::sweep_service::SweepService;
    use crate::domain::metrics::{Channel, Metric};
    use crate::infrastructure::config::OutputConfig;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    const QUANTIZER: &str = r#"
if [ "$3" = "$FAIL_AT" ]; then
    exit 3
fi
printf 'bits=%s\n' "$3" > "$2"
"#;

    const COMPARATOR: &str = r#"
bits=$(sed 's/bits=//' "$2")
echo "Comparing $1 with $2"
echo "Channel 0 RMSE: 0.5"
echo "Channel 0 Max error: 1"
echo "Channel 0 SNR: ${bits}.5 dB"
echo "Channel 1 RMSE: 0.25"
echo "Channel 1 Max error: 2"
echo "Channel 1 SNR: ${bits}.25 dB"
echo "Average RMSE: 3.2e-4"
echo "Average Max error: 1.5"
echo "Average SNR: ${bits} dB"
"#;

    /// Scripts are run through `sh` so they never need the exec bit.
    fn script_tools(dir: &Path, fail_at: Option<u8>) -> ProcessTools {
        let quantizer = dir.join("quant.sh");
        let comparator = dir.join("cmp.sh");
        let fail_at = fail_at.map(|b| b.to_string()).unwrap_or_default();
        fs::write(&quantizer, format!("FAIL_AT='{fail_at}'\n{QUANTIZER}")).unwrap();
        fs::write(&comparator, COMPARATOR).unwrap();

        ProcessTools::new(ToolsConfig {
            quantizer: ToolCommand {
                program: PathBuf::from("sh"),
                args: vec![quantizer.display().to_string()],
            },
            comparator: ToolCommand {
                program: PathBuf::from("sh"),
                args: vec![comparator.display().to_string()],
            },
        })
    }

    #[tokio::test]
    async fn test_compare_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let tools = script_tools(dir.path(), None);
        let quantized = dir.path().join("q.wav");

        tools.quantize(Path::new("orig.wav"), &quantized, 9).await.unwrap();
        let report = tools.compare(Path::new("orig.wav"), &quantized).await.unwrap();

        assert!(report.contains("Average RMSE: 3.2e-4"));
        assert!(report.contains("Channel 1 SNR: 9.25 dB"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_a_tool_error() {
        let dir = tempfile::tempdir().unwrap();
        let tools = script_tools(dir.path(), Some(4));

        let err = tools
            .quantize(Path::new("orig.wav"), &dir.path().join("q.wav"), 4)
            .await
            .unwrap_err();

        match err.downcast_ref::<ToolError>() {
            Some(ToolError::Failed { tool, status }) => {
                assert_eq!(*tool, "quantizer");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_a_launch_error() {
        let tools = ProcessTools::new(ToolsConfig {
            quantizer: ToolCommand::new("/nonexistent/wav_quant"),
            comparator: ToolCommand::new("/nonexistent/wav_cmp"),
        });

        let err = tools
            .compare(Path::new("a.wav"), Path::new("b.wav"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::Launch { tool: "comparator", .. })
        ));
        // io error appears once, as the source, not in the message too
        assert_eq!(err.to_string(), "Failed to launch comparator (/nonexistent/wav_cmp)");
        assert_eq!(err.chain().count(), 2);
    }

    #[tokio::test]
    async fn test_full_sweep_writes_fifteen_quantized_files() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(script_tools(dir.path(), None));
        let service = SweepService::new(tools, OutputConfig::in_directory(dir.path()));

        let series = service.run(Path::new("orig.wav")).await.unwrap();

        for bits in 1..=15 {
            assert!(dir.path().join(format!("quant_{bits}bit.wav")).exists());
        }
        assert_eq!(series.len(), 15);
        assert_eq!(series.series(Channel::Average, Metric::Snr)[0], Some(15.0));
        assert_eq!(series.series(Channel::Right, Metric::Snr)[14], Some(1.25));
        let avg_rmse = series.series(Channel::Average, Metric::Rmse);
        assert!(avg_rmse.iter().all(|v| v.is_some_and(|x| (x - 0.00032).abs() < 1e-12)));
    }

    #[tokio::test]
    async fn test_failing_quantizer_leaves_later_depths_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(script_tools(dir.path(), Some(10)));
        let service = SweepService::new(tools, OutputConfig::in_directory(dir.path()));

        assert!(service.run(Path::new("orig.wav")).await.is_err());

        for bits in 11..=15 {
            assert!(dir.path().join(format!("quant_{bits}bit.wav")).exists());
        }
        for bits in 1..=10 {
            assert!(!dir.path().join(format!("quant_{bits}bit.wav")).exists());
        }
    }
}
