//! WASM entry point and browser navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loading the module runs the guard once on the page's event loop. A page
//! may override the defaults with
//! `<meta name="signin-guard" content='{"redirect-to": "/login"}'>`.
//! Nothing here surfaces an error to the page; failures go to the console.

use wasm_bindgen::prelude::*;

use crate::config::GuardConfig;
use crate::error::GuardError;
use crate::guard::{Navigator, SignInGuard};
use crate::net::api::BrowserStatusSource;

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "browser_test.rs"]
mod browser_test;

const CONFIG_META_SELECTOR: &str = "meta[name=\"signin-guard\"]";

/// Console threshold; low enough that request and outcome lines show up.
const CONSOLE_LOG_LEVEL: log::Level = log::Level::Debug;

/// Navigates by assigning `window.location.href`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, target: &str) -> Result<(), GuardError> {
        let window = web_sys::window().ok_or_else(|| GuardError::Navigation("no window".to_owned()))?;
        window
            .location()
            .set_href(target)
            .map_err(|e| GuardError::Navigation(format!("{e:?}")))
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(CONSOLE_LOG_LEVEL) {
        log::warn!("console logger already installed: {e}");
    }

    let config = page_config();
    let guard = SignInGuard::new(config, BrowserStatusSource, BrowserNavigator);
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = guard.run().await;
        log::debug!("sign-in guard resolved: {outcome:?}");
    });
}

/// Config from the page's `signin-guard` meta tag, or defaults.
pub(crate) fn page_config() -> GuardConfig {
    GuardConfig::from_page_meta(config_meta_content().as_deref())
}

fn config_meta_content() -> Option<String> {
    let document = web_sys::window().and_then(|w| w.document())?;
    match document.query_selector(CONFIG_META_SELECTOR) {
        Ok(element) => element.and_then(|el| el.get_attribute("content")),
        Err(e) => {
            log::error!("signin-guard meta lookup failed: {e:?}");
            None
        }
    }
}
