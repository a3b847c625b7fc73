//! # PanelView Component
//!
//! Renders one panel as a bordered block over whatever lies beneath it.
//! Screens revealed underneath another (`Under`) are drawn dimmed.

use crate::core::surface::Visual;
use crate::tui::component::Component;
use crate::tui::panel::{Panel, Role};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

pub struct PanelView<'a> {
    pub panel: &'a Panel,
}

impl<'a> PanelView<'a> {
    pub fn new(panel: &'a Panel) -> Self {
        Self { panel }
    }

    fn style(&self) -> Style {
        let base = match self.panel.role() {
            Role::Screen => Style::default().fg(Color::White),
            Role::Modal => Style::default().fg(Color::Yellow),
            Role::Menu(_) => Style::default().fg(Color::Cyan),
            Role::StatusBar(_) => Style::default().fg(Color::Green),
        };
        if self.panel.has(Visual::Under) {
            base.add_modifier(Modifier::DIM)
        } else {
            base
        }
    }

    fn body(&self) -> String {
        match self.panel.role() {
            Role::Screen => "n: next  p: prev  s: show  x: clear".to_string(),
            Role::Modal => "c: close this modal  o: open another".to_string(),
            Role::Menu(side) => format!(
                "Docked on the {}. Click the screen to dismiss.",
                side.label()
            ),
            Role::StatusBar(side) => format!("Docked at the {}", side.label()),
        }
    }
}

impl Component for PanelView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = self.style();
        let paragraph = Paragraph::new(self.body())
            .block(
                Block::bordered()
                    .title(self.panel.title().to_string())
                    .border_style(style)
                    .title_style(style),
            )
            .style(style)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::{MenuSide, Screen, SurfaceId};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_panel_view_shows_title_and_hint() {
        let panel = Panel::new(SurfaceId(3), Role::Menu(MenuSide::Right), "Menu");
        let backend = TestBackend::new(60, 5);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                PanelView::new(&panel).render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Menu"));
        assert!(text.contains("Docked on the right"));
    }

    #[test]
    fn test_panel_under_is_dimmed() {
        let mut panel = Panel::new(SurfaceId(1), Role::Screen, "Screen 1");
        assert!(!PanelView::new(&panel).style().add_modifier.contains(Modifier::DIM));

        panel.set_visual(Visual::Under, true);
        assert!(PanelView::new(&panel).style().add_modifier.contains(Modifier::DIM));
    }
}
