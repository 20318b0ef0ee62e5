//! Page Context
//!
//! Shared, read-only state handed to every widget at wiring time.

use std::rc::Rc;

use crate::config::Config;

#[derive(Clone)]
pub struct PageContext {
    config: Rc<Config>,
}

impl PageContext {
    pub fn new(config: Config) -> Self {
        Self { config: Rc::new(config) }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Re-derive all page state from the server.
    ///
    /// The server owns every record shown here; after a mutation the page
    /// is simply reloaded instead of patching the DOM.
    pub fn resync(&self) {
        log::info!(target: "page", "resynchronizing from server");
        crate::dom::reload();
    }
}
