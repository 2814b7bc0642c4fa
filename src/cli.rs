//! Command-line surface

use crate::{Preset, RunConfig};
use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  sharecard
  sharecard --all
  sharecard --size vertical
  sharecard --quality 100 --output images/";

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "sharecard")]
#[command(about = "Batch-convert the HTML files in a directory to PNG images")]
#[command(version, after_help = EXAMPLES)]
pub struct Cli {
    /// Generate every size (square, vertical, story)
    #[arg(long)]
    pub all: bool,

    /// Size to generate when --all is not given
    #[arg(long, value_enum, default_value_t = Preset::Square)]
    pub size: Preset,

    /// Image quality (0-100); PNG output is lossless so this has no effect
    #[arg(long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,

    /// Output directory
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Directory containing the HTML files to convert
    #[arg(long, default_value = ".")]
    pub input: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            input_dir: self.input,
            output_dir: self.output,
            quality: self.quality,
            preset: self.size,
            all_sizes: self.all,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sharecard").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_run_config() {
        let cfg = parse(&[]).unwrap().into_config();
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn flags_populate_config() {
        let cfg = parse(&["--all", "--size", "story", "--quality", "100", "--output", "images/"])
            .unwrap()
            .into_config();
        assert!(cfg.all_sizes);
        assert_eq!(cfg.preset, Preset::Story);
        assert_eq!(cfg.quality, 100);
        assert_eq!(cfg.output_dir, PathBuf::from("images/"));
    }

    #[test]
    fn unknown_size_is_rejected() {
        let err = parse(&["--size", "landscape"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn quality_out_of_range_is_rejected() {
        assert!(parse(&["--quality", "101"]).is_err());
        assert!(parse(&["--quality", "0"]).is_ok());
    }

    #[test]
    fn help_short_and_long() {
        for flag in ["--help", "-h"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
            assert_eq!(err.exit_code(), 0);
        }
    }

    #[test]
    fn help_wins_over_other_flags() {
        let err = parse(&["--all", "--output", "x", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
