//! # TitleBar Component
//!
//! Top line summarizing the navigation shell:
//!
//! 1. **Current screen**: `"shellnav [Screen 2]"`, or `"shellnav [empty]"`
//! 2. **Overlays**: ` | modals: 2 | menu | status bar`, each only when present
//! 3. **Status message**: ` | Forward to screen 2`, when non-empty
//!
//! Purely presentational: it receives all data as props and has no internal
//! state.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    /// Title of the current primary screen, if any
    pub current: Option<String>,
    pub modal_depth: usize,
    pub has_menu: bool,
    pub has_status_bar: bool,
    /// Outcome of the last operation (e.g. "Rejected: ...")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(
        current: Option<String>,
        modal_depth: usize,
        has_menu: bool,
        has_status_bar: bool,
        status_message: String,
    ) -> Self {
        Self {
            current,
            modal_depth,
            has_menu,
            has_status_bar,
            status_message,
        }
    }

    fn text(&self) -> String {
        let mut text = format!(
            "shellnav [{}]",
            self.current.as_deref().unwrap_or("empty")
        );
        if self.modal_depth > 0 {
            text.push_str(&format!(" | modals: {}", self.modal_depth));
        }
        if self.has_menu {
            text.push_str(" | menu");
        }
        if self.has_status_bar {
            text.push_str(" | status bar");
        }
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    /// Single line, plain span; no borders needed.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
