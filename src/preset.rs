//! Named output sizes

use crate::{Viewport, DEVICE_SCALE_FACTOR};
use std::fmt;
use std::path::Path;

/// A named (width, height, suffix) image shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Preset {
    /// 1080×1080, feeds and timelines
    #[default]
    Square,
    /// 1080×1350, portrait posts
    Vertical,
    /// 1080×1920, stories and short video covers
    Story,
}

impl Preset {
    /// Every preset, in declaration order.
    pub fn all() -> &'static [Preset] {
        &[Preset::Square, Preset::Vertical, Preset::Story]
    }

    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::all().iter().copied().find(|p| p.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Square => "square",
            Preset::Vertical => "vertical",
            Preset::Story => "story",
        }
    }

    pub fn width(&self) -> u32 {
        1080
    }

    pub fn height(&self) -> u32 {
        match self {
            Preset::Square => 1080,
            Preset::Vertical => 1350,
            Preset::Story => 1920,
        }
    }

    /// Appended to the input's base name to form the output file name
    pub fn suffix(&self) -> &'static str {
        match self {
            Preset::Square => "-square",
            Preset::Vertical => "-vertical",
            Preset::Story => "-story",
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width(),
            height: self.height(),
            device_scale_factor: DEVICE_SCALE_FACTOR,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `<input basename without .html><suffix>.png`
pub fn output_file_name(input: &Path, preset: Preset) -> String {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".html").unwrap_or(&file_name);
    format!("{}{}.png", stem, preset.suffix())
}
