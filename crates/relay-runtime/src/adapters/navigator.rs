//! # Navigator
//!
//! A minimal route stack standing in for the platform router. Pages push
//! route strings; the router applies its URL size limit by cutting anything
//! past it, exactly as a real navigation layer would. It knows nothing about
//! the data bus or the preferences store.

use parking_lot::RwLock;
use pr_02_route_params::truncate_to_limit;
use tracing::{debug, warn};

/// Result of a push or replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Route as stored on the stack, after any truncation.
    pub url: String,
    /// Whether the route lost bytes to the size limit.
    pub truncated: bool,
}

/// Route stack with a byte limit per route.
#[derive(Debug)]
pub struct Navigator {
    max_url_bytes: usize,
    stack: RwLock<Vec<String>>,
}

impl Navigator {
    pub fn new(max_url_bytes: usize) -> Self {
        Self {
            max_url_bytes,
            stack: RwLock::new(Vec::new()),
        }
    }

    pub fn max_url_bytes(&self) -> usize {
        self.max_url_bytes
    }

    /// Open a new page on top of the stack.
    pub fn push(&self, url: &str) -> Navigation {
        let navigation = self.clip(url);
        self.stack.write().push(navigation.url.clone());
        debug!(url = %navigation.url, depth = self.depth(), "Navigated");
        navigation
    }

    /// Swap the top page for `url`; behaves like `push` on an empty stack.
    pub fn replace(&self, url: &str) -> Navigation {
        let navigation = self.clip(url);
        {
            let mut stack = self.stack.write();
            stack.pop();
            stack.push(navigation.url.clone());
        }
        debug!(url = %navigation.url, "Replaced current route");
        navigation
    }

    /// Close the top page, returning its route.
    pub fn back(&self) -> Option<String> {
        let popped = self.stack.write().pop();
        if let Some(url) = &popped {
            debug!(%url, "Navigated back");
        }
        popped
    }

    /// Route of the visible page.
    pub fn current(&self) -> Option<String> {
        self.stack.read().last().cloned()
    }

    pub fn depth(&self) -> usize {
        self.stack.read().len()
    }

    fn clip(&self, url: &str) -> Navigation {
        let kept = truncate_to_limit(url, self.max_url_bytes);
        let truncated = kept.len() < url.len();
        if truncated {
            warn!(
                size = url.len(),
                max = self.max_url_bytes,
                "Route exceeds navigation limit, truncating"
            );
        }
        Navigation {
            url: kept.to_string(),
            truncated,
        }
    }
}
