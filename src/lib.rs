//! Sharecard
//!
//! Renders local HTML share cards to PNG images through a headless browser,
//! one page per (file, size) pair, plus a typed model of the documentation
//! site configuration that ships next to the cards.
//!
//! # Features
//!
//! - **CDP Backend** (default): drives headless Chrome via the DevTools Protocol
//! - **Pluggable sessions**: the converter only talks to the [`Session`] and
//!   [`Page`] traits, so tests can swap in a scripted backend
//!
//! # Example
//!
//! ```no_run
//! use sharecard::{Preset, RunConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RunConfig {
//!     preset: Preset::Vertical,
//!     output_dir: "images".into(),
//!     ..Default::default()
//! };
//!
//! let report = sharecard::run(&config)?;
//! println!("wrote {} images", report.written.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod cli;
pub mod config;
pub mod convert;
pub mod inputs;
pub mod preset;
pub mod site;

#[cfg(feature = "cdp")]
pub mod cdp;

pub use config::RunConfig;
pub use convert::{Converter, Failure, Report};
pub use preset::Preset;

#[cfg(feature = "cdp")]
pub use convert::run;

/// Pixel-density multiplier applied to every capture.
pub const DEVICE_SCALE_FACTOR: f64 = 2.0;

/// Viewport dimensions and pixel density of a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
}

impl Viewport {
    /// Size in device pixels of a viewport capture.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width as f64 * self.device_scale_factor).round() as u32,
            (self.height as f64 * self.device_scale_factor).round() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            device_scale_factor: DEVICE_SCALE_FACTOR,
        }
    }
}

/// How long a navigation may take and how long to let the page settle.
///
/// Navigation is complete once the main frame reports network idle (no
/// connections for 500ms). The whole wait, navigation included, is bounded
/// by `timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Upper bound for navigation plus network idle
    pub timeout: Duration,
    /// Extra delay after network idle for in-page rendering and animations
    pub render_delay: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(30000),
            render_delay: Duration::from_millis(1000),
        }
    }
}

/// A browser session shared by a whole run.
///
/// A session is opened once and closed once; every conversion gets its own
/// [`Page`].
pub trait Session {
    type Page: Page;

    /// Open a fresh page scoped to a single conversion
    fn new_page(&self) -> Result<Self::Page>;

    /// Shut the browser down
    fn close(self) -> Result<()>;
}

/// A single browser page.
pub trait Page {
    /// Resize the rendering surface
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Navigate to `url` and block until the network is idle or the
    /// timeout in `wait` elapses
    fn goto(&mut self, url: &str, wait: &WaitOptions) -> Result<()>;

    /// Capture the current viewport (not the full page) as PNG bytes
    fn screenshot(&mut self) -> Result<Vec<u8>>;

    /// Close the page
    fn close(self) -> Result<()>;
}
