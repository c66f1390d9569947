// Command line arguments
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Sweep quantization bit depth and plot the fidelity loss",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Original 16-bit PCM WAV used as the reference signal
    #[arg(value_name = "ORIGINAL_WAV")]
    pub original: PathBuf,
}

pub fn usage(program: &str) -> String {
    format!("Usage: {} <original.wav>", program)
}

/// Parse the process arguments. The only accepted form is one positional
/// path; anything else, flags included, prints the usage line to stdout and
/// exits with status 1.
pub fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(_) => {
            let program = std::env::args().next().unwrap_or_else(|| "bitdepth-sweep".to_string());
            println!("{}", usage(&program));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_positional_is_accepted() {
        let args = Args::try_parse_from(["bitdepth-sweep", "sample.wav"]).unwrap();
        assert_eq!(args.original, PathBuf::from("sample.wav"));
    }

    #[test]
    fn test_wrong_argument_count_is_rejected() {
        assert!(Args::try_parse_from(["bitdepth-sweep"]).is_err());
        assert!(Args::try_parse_from(["bitdepth-sweep", "a.wav", "b.wav"]).is_err());
    }

    #[test]
    fn test_flags_are_rejected() {
        for flag in ["--help", "-h", "--version", "-V"] {
            assert!(Args::try_parse_from(["bitdepth-sweep", flag]).is_err(), "{flag} accepted");
        }
        assert!(Args::try_parse_from(["bitdepth-sweep", "--help", "a.wav"]).is_err());
    }

    #[test]
    fn test_usage_message() {
        assert_eq!(usage("./sweep"), "Usage: ./sweep <original.wav>");
    }
}
