//! The host surface the controller renders into.
//!
//! A page has two containers whose contents are replaced wholesale, a way to
//! put a blocking alert in front of the user, and a console for details the
//! user never sees. [`MemoryPage`] records all three; the terminal host lives
//! in [`terminal`] and the web host builds on `MemoryPage`.

pub mod terminal;

pub use terminal::TerminalPage;

use crate::logger::Logger;

/// The fixed regions of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Results,
    Statistics,
}

impl Container {
    /// Element id of the container on the page.
    pub fn id(self) -> &'static str {
        match self {
            Self::Results => "results",
            Self::Statistics => "statistics",
        }
    }
}

/// Capabilities the controller needs from its host.
pub trait Page {
    /// Replace everything inside `container` with `html`.
    fn replace_contents(&mut self, container: Container, html: String);

    /// Show a message the user has to acknowledge.
    fn alert(&mut self, message: &str);

    /// Record a diagnostic the user is not shown.
    fn console_error(&mut self, message: &str);
}

impl<P: Page + ?Sized> Page for &mut P {
    fn replace_contents(&mut self, container: Container, html: String) {
        (**self).replace_contents(container, html);
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message);
    }

    fn console_error(&mut self, message: &str) {
        (**self).console_error(message);
    }
}

// ---------------------------------------------------------------------------
// In-memory host
// ---------------------------------------------------------------------------

/// A page that keeps its state in memory.
///
/// Console lines are also forwarded to the attached [`Logger`].
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    results: String,
    statistics: String,
    /// Every container write, oldest first.
    pub writes: Vec<(Container, String)>,
    /// Every alert shown, oldest first.
    pub alerts: Vec<String>,
    /// Every console line, oldest first.
    pub console: Vec<String>,
    logger: Logger,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: Logger) -> Self {
        Self {
            logger,
            ..Self::default()
        }
    }

    /// Current inner HTML of a container.
    pub fn contents(&self, container: Container) -> &str {
        match container {
            Container::Results => &self.results,
            Container::Statistics => &self.statistics,
        }
    }
}

impl Page for MemoryPage {
    fn replace_contents(&mut self, container: Container, html: String) {
        match container {
            Container::Results => self.results.clone_from(&html),
            Container::Statistics => self.statistics.clone_from(&html),
        }
        self.writes.push((container, html));
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn console_error(&mut self, message: &str) {
        self.logger.error(message);
        self.console.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_ids() {
        assert_eq!(Container::Results.id(), "results");
        assert_eq!(Container::Statistics.id(), "statistics");
    }

    #[test]
    fn memory_page_replaces_contents() {
        let mut page = MemoryPage::new();
        page.replace_contents(Container::Results, "<p>one</p>".to_string());
        page.replace_contents(Container::Results, "<p>two</p>".to_string());
        assert_eq!(page.contents(Container::Results), "<p>two</p>");
        assert_eq!(page.contents(Container::Statistics), "");
        assert_eq!(page.writes.len(), 2);
    }

    #[test]
    fn memory_page_records_alerts_and_console() {
        let mut page = MemoryPage::new();
        page.alert("check your input");
        page.console_error("statistics unavailable");
        assert_eq!(page.alerts, vec!["check your input"]);
        assert_eq!(page.console, vec!["statistics unavailable"]);
    }

    #[test]
    fn mutable_reference_is_a_page() {
        fn touch(mut page: impl Page) {
            page.alert("hi");
        }
        let mut page = MemoryPage::new();
        touch(&mut page);
        assert_eq!(page.alerts.len(), 1);
    }
}
