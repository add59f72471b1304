//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Config file name searched for when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "iconmap.toml";

/// Compile a directory of SVG icons into a single JSON lookup table
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the icon files [default: assets/icons]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// JSON file to write [default: src/components/Icons/map.json]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: iconmap.toml, searched upward from cwd)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Fail on the first malformed icon instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print per-icon details
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::try_parse_from(["iconmap"]).unwrap();
        assert!(cli.source.is_none());
        assert!(cli.output.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.strict);
    }

    #[test]
    fn test_cli_positional_paths() {
        let cli =
            Cli::try_parse_from(["iconmap", "icons", "out/map.json", "--strict", "-v"]).unwrap();
        assert_eq!(cli.source, Some(PathBuf::from("icons")));
        assert_eq!(cli.output, Some(PathBuf::from("out/map.json")));
        assert!(cli.strict);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_config_flag() {
        let cli = Cli::try_parse_from(["iconmap", "-C", "build/icons.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("build/icons.toml")));
    }
}
