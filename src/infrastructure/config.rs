use crate::domain::metrics::{Channel, Metric};
use crate::domain::sweep::BitDepth;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Optional config file looked up in the working directory (`harness.toml`).
pub const CONFIG_NAME: &str = "harness";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HarnessConfig {
    pub tools: ToolsConfig,
    pub output: OutputConfig,
    pub figure: FigureConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ToolsConfig {
    pub quantizer: ToolCommand,
    pub comparator: ToolCommand,
}

/// Program plus leading arguments placed before the positional ones.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ToolCommand {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub quantized_file: String,
    pub figure_file: String,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            quantizer: ToolCommand::new("../bin/wav_quant"),
            comparator: ToolCommand::new("../bin/wav_cmp"),
        }
    }
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            quantized_file: "quant_${bits}bit.wav".to_string(),
            figure_file: "${channel}_${metric}_vs_bits.png".to_string(),
        }
    }
}

impl Default for FigureConfig {
    // 8x5 inches at 150 dpi
    fn default() -> Self {
        Self {
            width: 1200,
            height: 750,
        }
    }
}

impl OutputConfig {
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn quantized_path(&self, bit_depth: BitDepth) -> PathBuf {
        let mut vars = HashMap::new();
        vars.insert("bits".to_string(), bit_depth.to_string());
        self.directory.join(expand_template(&self.quantized_file, &vars))
    }

    pub fn figure_path(&self, channel: Channel, metric: Metric) -> PathBuf {
        let mut vars = HashMap::new();
        vars.insert("channel".to_string(), channel.file_label().to_string());
        vars.insert("metric".to_string(), metric.file_label().to_string());
        self.directory.join(expand_template(&self.figure_file, &vars))
    }
}

/// Load `harness.toml` from the working directory, falling back to defaults
/// when it does not exist.
pub fn load_harness_config() -> anyhow::Result<HarnessConfig> {
    build_config(config::File::with_name(CONFIG_NAME).required(false))
}

pub fn load_harness_config_from(path: &Path) -> anyhow::Result<HarnessConfig> {
    build_config(config::File::from(path).required(true))
}

fn build_config<S>(source: S) -> anyhow::Result<HarnessConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder().add_source(source).build()?;

    Ok(settings.try_deserialize()?)
}

/// Build an output file name from a template such as `quant_${bits}bit.wav`:
/// every `${key}` is replaced by `vars[key]`; unknown placeholders are left
/// as they are.
pub fn expand_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
