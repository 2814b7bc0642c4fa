//! Run configuration, fixed once at startup

use crate::{Preset, WaitOptions};
use std::path::PathBuf;

/// Options for a single conversion run.
///
/// Built from the command line (see [`crate::cli`]) and never mutated
/// afterwards.
///
/// # Examples
///
/// ```
/// let cfg = sharecard::RunConfig::default();
/// assert_eq!(cfg.output_dir, std::path::PathBuf::from("output"));
/// assert_eq!(cfg.presets(), vec![sharecard::Preset::Square]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Directory scanned for `.html` inputs
    pub input_dir: PathBuf,
    /// Destination for generated images, created if missing
    pub output_dir: PathBuf,
    /// Image quality (0-100). PNG is lossless so this is recorded only.
    pub quality: u8,
    /// Size used when `all_sizes` is off
    pub preset: Preset,
    /// Render every preset for each input
    pub all_sizes: bool,
    /// Navigation timing
    pub wait: WaitOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("output"),
            quality: 95,
            preset: Preset::default(),
            all_sizes: false,
            wait: WaitOptions::default(),
        }
    }
}

impl RunConfig {
    /// The presets rendered for each input file
    pub fn presets(&self) -> Vec<Preset> {
        if self.all_sizes {
            Preset::all().to_vec()
        } else {
            vec![self.preset]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sizes_overrides_selected_preset() {
        let cfg = RunConfig {
            preset: Preset::Story,
            all_sizes: true,
            ..Default::default()
        };
        assert_eq!(cfg.presets(), vec![Preset::Square, Preset::Vertical, Preset::Story]);
    }

    #[test]
    fn single_preset_by_default() {
        let cfg = RunConfig {
            preset: Preset::Vertical,
            ..Default::default()
        };
        assert_eq!(cfg.presets(), vec![Preset::Vertical]);
        assert_eq!(cfg.quality, 95);
    }
}
