//! Opening search URLs.

use tracing::{info, warn};

/// Result of asking a navigator to open a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The URL was handed off.
    Opened,
    /// The URL could not be opened; not fatal.
    Blocked(String),
}

impl NavigationOutcome {
    pub fn is_opened(&self) -> bool {
        matches!(self, NavigationOutcome::Opened)
    }
}

/// Something that can open a URL in a new browser tab (or equivalent).
pub trait Navigator {
    fn open(&self, url: &str) -> NavigationOutcome;
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn open(&self, url: &str) -> NavigationOutcome {
        (**self).open(url)
    }
}

/// Opens URLs with the system default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &str) -> NavigationOutcome {
        match open::that_detached(url) {
            Ok(()) => {
                info!("Opened {}", url);
                NavigationOutcome::Opened
            }
            Err(e) => {
                warn!("Could not open browser: {}", e);
                NavigationOutcome::Blocked(e.to_string())
            }
        }
    }
}

/// Writes URLs to stdout instead of opening them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open(&self, url: &str) -> NavigationOutcome {
        println!("{}", url);
        NavigationOutcome::Opened
    }
}
