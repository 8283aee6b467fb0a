// window.rs - Tab window: ties navigation, fetch, render and history together

use crate::errors::{FetchError, Result, ShellError};
use crate::fetch::{Fetcher, Page};
use crate::navigation::{NavButtons, NavigationStack};
use crate::render::{extract_title, Render};
use crate::services::BrowserServices;
use browser_db::{Database, VisitedAddress};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One entry of the per-window stack: the visit plus what was fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedEntry {
    pub visit: VisitedAddress,
    pub page: Page,
}

/// Cloneable handle used to tear a window down while a fetch is pending
#[derive(Debug, Clone, Default)]
pub struct WindowHandle {
    closed: Arc<AtomicBool>,
}

impl WindowHandle {
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct TabWindow<F, R> {
    services: Arc<BrowserServices>,
    fetcher: Arc<F>,
    renderer: R,
    stack: NavigationStack<VisitedEntry>,
    handle: WindowHandle,
    initialized: bool,
}

impl<F: Fetcher, R: Render> TabWindow<F, R> {
    pub fn new(services: Arc<BrowserServices>, fetcher: Arc<F>, renderer: R) -> Self {
        let mut window = Self {
            services,
            fetcher,
            renderer,
            stack: NavigationStack::new(),
            handle: WindowHandle::default(),
            initialized: false,
        };
        window.check_nav_buttons();
        window
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle.clone()
    }

    pub fn close(&self) {
        log::info!("Closing window");
        self.handle.close();
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn stack(&self) -> &NavigationStack<VisitedEntry> {
        &self.stack
    }

    pub fn nav_buttons(&self) -> NavButtons {
        self.stack.buttons()
    }

    /// Show a non-page message (listings, notices) in the content area
    pub fn show_message(&mut self, body: &str, title: &str) {
        self.renderer.render_page(body, title);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.handle.is_closed() {
            return Err(ShellError::WindowClosed);
        }
        Ok(())
    }

    fn check_nav_buttons(&mut self) {
        let buttons = self.stack.buttons();
        self.renderer.set_nav_buttons(buttons);
    }

    fn display_page(&mut self, page: &Page) {
        let title = extract_title(&page.body);
        self.renderer.set_address(&page.address);
        self.renderer.render_status(page.status, &title, &page.body);
    }

    fn display_current(&mut self) {
        match self.stack.current() {
            Some(entry) => {
                let title = extract_title(&entry.page.body);
                self.renderer.set_address(&entry.page.address);
                self.renderer
                    .render_status(entry.page.status, &title, &entry.page.body);
            }
            None => self
                .renderer
                .render_page(&ShellError::EmptyResult.to_string(), "Empty response"),
        }
    }

    /// Fetch and display `address` without touching history or the stack
    pub async fn load_url(&mut self, address: &str) -> Result<Page> {
        self.ensure_open()?;

        let address = address.trim();
        if address.is_empty() {
            self.renderer
                .render_page(&ShellError::EmptyAddress.to_string(), "Invalid or empty URL");
            return Err(ShellError::EmptyAddress);
        }

        self.renderer.set_address(address);
        let outcome = self.fetcher.fetch(address).await;

        // The window may have been torn down while the fetch was pending
        if self.handle.is_closed() {
            log::warn!("Dropping response for {}: window closed", address);
            return Err(ShellError::WindowClosed);
        }

        match outcome {
            Ok(page) if page.body.is_empty() => {
                let err = FetchError::EmptyResponse;
                self.renderer.render_page(&err.body(), &err.title());
                Err(err.into())
            }
            Ok(page) => {
                self.display_page(&page);
                Ok(page)
            }
            Err(err) => {
                log::info!("Failed to load {}: {}", address, err);
                self.renderer.render_page(&err.body(), &err.title());
                Err(err.into())
            }
        }
    }

    /// Navigate to a new address: fetch, persist the visit, push it on the
    /// stack (dropping any forward entries).
    pub async fn load_url_with_history(&mut self, address: &str) -> Result<VisitedAddress> {
        let page = self.load_url(address).await?;

        let now = Database::current_timestamp_millis();
        let visit = match self.services.history.record_visit(&page.address, now).await {
            Ok(visit) => visit,
            Err(e) => {
                log::error!("Failed to save {} to history: {}", page.address, e);
                self.renderer.render_page(&e.to_string(), "Error Occurred");
                return Err(e.into());
            }
        };

        self.stack.visit(VisitedEntry {
            visit: visit.clone(),
            page,
        });
        self.check_nav_buttons();
        Ok(visit)
    }

    /// First draw: show the home page. It goes on the stack but not into
    /// history. Only runs once per window.
    pub async fn show_home_page(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;

        let home = self.services.options.home_page()?;
        let page = self.load_url(&home).await?;

        let key = self
            .services
            .history
            .next_visit_key(Database::current_timestamp_millis());
        self.stack.visit(VisitedEntry {
            visit: VisitedAddress::new(key, page.address.clone()),
            page,
        });
        self.check_nav_buttons();
        Ok(())
    }

    /// Navigate to the configured home page
    pub async fn home(&mut self) -> Result<VisitedAddress> {
        let home = self.services.options.home_page()?;
        self.load_url_with_history(&home).await
    }

    /// Step back and redisplay the cached entry. Returns whether it moved.
    pub fn back(&mut self) -> bool {
        let moved = self.stack.back().is_some();
        if moved {
            self.display_current();
        }
        self.check_nav_buttons();
        moved
    }

    /// Step forward and redisplay the cached entry. Returns whether it moved.
    pub fn forward(&mut self) -> bool {
        let moved = self.stack.forward().is_some();
        if moved {
            self.display_current();
        }
        self.check_nav_buttons();
        moved
    }

    /// Fetch the current entry's address again. The stack is left as it was
    /// whether or not the fetch succeeds.
    pub async fn refresh(&mut self) -> Result<Page> {
        let address = match self.stack.current() {
            Some(entry) => entry.visit.address().to_string(),
            None => return Err(ShellError::EmptyResult),
        };
        self.load_url(&address).await
    }
}
