//! Chrome DevTools Protocol backend

use crate::{Error, Page, Result, Session, Viewport, WaitOptions};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::types::Event;
use headless_chrome::protocol::cdp::Emulation;
use headless_chrome::protocol::cdp::Page as CdpPageDomain;
use headless_chrome::{Browser, LaunchOptions};
use log::{debug, warn};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Options used when starting Chrome
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Explicit Chrome binary; autodetected when `None`
    pub chrome_path: Option<PathBuf>,
    /// Run with the Chrome sandbox enabled
    pub sandbox: bool,
    /// Chrome is killed after this long without any DevTools traffic
    pub idle_timeout: Duration,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            sandbox: false,
            idle_timeout: Duration::from_secs(120),
        }
    }
}

/// A headless Chrome process shared by every page of a run.
///
/// Dropping the session terminates the browser process.
pub struct CdpSession {
    browser: Browser,
}

impl CdpSession {
    pub fn launch(config: &LaunchConfig) -> Result<Self> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(config.sandbox)
            .path(config.chrome_path.clone())
            .idle_browser_timeout(config.idle_timeout)
            .args(launch_args(config))
            .build()
            .map_err(|e| Error::LaunchError(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::LaunchError(format!("Failed to launch browser: {}", e)))?;

        Ok(Self { browser })
    }
}

/// Extra Chrome flags; the setuid sandbox is only switched off alongside the
/// main sandbox.
fn launch_args(config: &LaunchConfig) -> Vec<&'static OsStr> {
    if config.sandbox {
        Vec::new()
    } else {
        vec![OsStr::new("--disable-setuid-sandbox")]
    }
}

impl Session for CdpSession {
    type Page = CdpPage;

    fn new_page(&self) -> Result<CdpPage> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| Error::PageError(format!("Failed to create tab: {}", e)))?;
        CdpPage::attach(tab)
    }

    fn close(self) -> Result<()> {
        drop(self.browser);
        Ok(())
    }
}

/// Main-frame load progress, driven by `Page.lifecycleEvent`.
#[derive(Debug, Default)]
struct LoadState {
    network_idle: bool,
}

impl LoadState {
    fn on_lifecycle(&mut self, name: &str) {
        match name {
            "init" => self.network_idle = false,
            "networkIdle" => self.network_idle = true,
            _ => {}
        }
    }
}

/// Recovers from poisoning; the state is a single flag.
fn lock_state(state: &Mutex<LoadState>) -> MutexGuard<'_, LoadState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Device metrics for a viewport, desktop mode.
fn device_metrics(viewport: Viewport) -> Emulation::SetDeviceMetricsOverride {
    Emulation::SetDeviceMetricsOverride {
        width: viewport.width,
        height: viewport.height,
        device_scale_factor: viewport.device_scale_factor,
        mobile: false,
        scale: None,
        screen_width: None,
        screen_height: None,
        position_x: None,
        position_y: None,
        dont_set_visible_size: None,
        screen_orientation: None,
        viewport: None,
        display_feature: None,
        device_posture: None,
    }
}

/// One tab of the shared browser
pub struct CdpPage {
    tab: Arc<Tab>,
    load: Arc<Mutex<LoadState>>,
}

impl CdpPage {
    fn attach(tab: Arc<Tab>) -> Result<Self> {
        tab.call_method(CdpPageDomain::SetLifecycleEventsEnabled { enabled: true })
            .map_err(|e| Error::PageError(format!("Failed to enable lifecycle events: {}", e)))?;

        let load = Arc::new(Mutex::new(LoadState::default()));
        let main_frame = tab.get_target_id().clone();
        let state = load.clone();
        tab.add_event_listener(Arc::new(move |event: &Event| {
            if let Event::PageLifecycleEvent(ev) = event {
                if ev.params.frame_id != main_frame {
                    return;
                }
                lock_state(&state).on_lifecycle(&ev.params.name);
            }
        }))
        .map_err(|e| Error::PageError(format!("Failed to watch lifecycle events: {}", e)))?;

        Ok(Self { tab, load })
    }

    fn is_network_idle(&self) -> bool {
        lock_state(&self.load).network_idle
    }

    fn reset_load_state(&self) {
        lock_state(&self.load).network_idle = false;
    }
}

impl Page for CdpPage {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.tab
            .call_method(device_metrics(viewport))
            .map_err(|e| Error::PageError(format!("Failed to set viewport: {}", e)))?;
        Ok(())
    }

    fn goto(&mut self, url: &str, wait: &WaitOptions) -> Result<()> {
        let timeout_ms = wait.timeout.as_millis() as u64;
        let deadline = Instant::now() + wait.timeout;

        self.reset_load_state();
        self.tab.set_default_timeout(wait.timeout);

        self.tab
            .navigate_to(url)
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        self.tab.wait_until_navigated().map_err(|e| {
            if Instant::now() >= deadline {
                Error::Timeout(timeout_ms)
            } else {
                Error::LoadError(format!("Wait for navigation failed: {}", e))
            }
        })?;

        while !self.is_network_idle() {
            if Instant::now() >= deadline {
                return Err(Error::Timeout(timeout_ms));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
        debug!("Network idle for {}", url);

        Ok(())
    }

    fn screenshot(&mut self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CdpPageDomain::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::RenderError(format!("Screenshot failed: {}", e)))
    }

    fn close(self) -> Result<()> {
        match self.tab.close(false) {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("Failed to close tab {}: {}", self.tab.get_target_id(), e);
                Err(Error::PageError(format!("Failed to close tab: {}", e)))
            }
        }
    }
}
