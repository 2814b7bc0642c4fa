//! Conversion driver
//!
//! Walks every (input file, preset) pair in order, one page per pair, and
//! keeps going when a single conversion fails. The browser session is
//! opened once for the whole run.

use crate::preset::output_file_name;
use crate::{inputs, Error, Page, Preset, Result, RunConfig, Session};
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// A conversion that did not produce an image
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub input: PathBuf,
    pub preset: Preset,
    pub message: String,
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Images written, in conversion order
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

/// Drives conversions against an already-open [`Session`].
pub struct Converter<'a> {
    config: &'a RunConfig,
}

impl<'a> Converter<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Convert every file with every configured preset.
    ///
    /// Failures are logged and collected; they never abort the run.
    pub fn run<S: Session>(&self, session: &S, files: &[PathBuf]) -> Report {
        let mut report = Report::default();
        let presets = self.config.presets();

        for (i, input) in files.iter().enumerate() {
            info!("");
            info!("[{}/{}] Converting {}:", i + 1, files.len(), display_name(input));

            for &preset in &presets {
                match self.convert(session, input, preset) {
                    Ok(path) => report.written.push(path),
                    Err(e) => {
                        error!("  ✗ Conversion failed: {}", e);
                        report.failures.push(Failure {
                            input: input.clone(),
                            preset,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        report
    }

    /// Convert one file at one size on a page of its own. The page is closed
    /// whatever the outcome.
    pub fn convert<S: Session>(&self, session: &S, input: &Path, preset: Preset) -> Result<PathBuf> {
        let mut page = session.new_page()?;
        let result = self.capture(&mut page, input, preset);
        if let Err(e) = page.close() {
            warn!("Failed to close page for {}: {}", display_name(input), e);
        }
        result
    }

    fn capture<P: Page>(&self, page: &mut P, input: &Path, preset: Preset) -> Result<PathBuf> {
        page.set_viewport(preset.viewport())?;

        let url = file_url(input)?;
        debug!("Navigating to {}", url);
        page.goto(url.as_str(), &self.config.wait)?;

        std::thread::sleep(self.config.wait.render_delay);

        let png = page.screenshot()?;
        let name = output_file_name(input, preset);
        let path = self.config.output_dir.join(&name);
        fs::write(&path, &png)?;

        let size_kb = fs::metadata(&path)?.len() as f64 / 1024.0;
        info!(
            "  ✓ {} ({}×{}, {:.2} KB)",
            name,
            preset.width(),
            preset.height(),
            size_kb
        );

        Ok(path)
    }
}

/// Run a whole conversion: enumerate inputs, open a session via `launch`,
/// convert, and close the session.
///
/// Returns an empty report without launching anything when the input
/// directory has no HTML files.
pub fn run_with<S, F>(config: &RunConfig, launch: F) -> Result<Report>
where
    S: Session,
    F: FnOnce() -> Result<S>,
{
    info!("Converting HTML to images");
    debug!(
        "Quality {} recorded; PNG output is lossless and ignores it",
        config.quality
    );

    let files = inputs::html_files(&config.input_dir)?;
    if files.is_empty() {
        error!("No HTML files found in {}", config.input_dir.display());
        return Ok(Report::default());
    }

    info!("Found {} HTML file(s):", files.len());
    for (i, file) in files.iter().enumerate() {
        info!("  {}. {}", i + 1, display_name(file));
    }

    ensure_output_dir(&config.output_dir)?;

    info!("Launching browser...");
    let session = launch()?;

    let report = Converter::new(config).run(&session, &files);

    if let Err(e) = session.close() {
        warn!("Failed to close browser: {}", e);
    }

    info!("");
    info!(
        "Done: {} image(s) written, {} failed",
        report.written.len(),
        report.failures.len()
    );
    let out = fs::canonicalize(&config.output_dir).unwrap_or_else(|_| config.output_dir.clone());
    info!("Images saved in {}", out.display());

    Ok(report)
}

/// Run a conversion with the headless Chrome backend.
#[cfg(feature = "cdp")]
pub fn run(config: &RunConfig) -> Result<Report> {
    run_with(config, || crate::cdp::CdpSession::launch(&crate::cdp::LaunchConfig::default()))
}

fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        info!("✓ Created output directory {}", dir.display());
    }
    Ok(())
}

fn file_url(input: &Path) -> Result<Url> {
    let abs = fs::canonicalize(input)?;
    Url::from_file_path(&abs)
        .map_err(|_| Error::ConfigError(format!("Cannot build a file URL for {}", abs.display())))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
