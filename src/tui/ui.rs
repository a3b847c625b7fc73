use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::core::surface::{BarSide, MenuSide};
use crate::tui::component::Component;
use crate::tui::components::{PanelView, TitleBar};
use crate::tui::panel::{MENU_WIDTH, Offset, Panel, Role};
use crate::tui::shell::ShellState;

/// Rows a docked status bar takes.
pub const STATUS_BAR_HEIGHT: u16 = 3;

const HELP_TEXT: &str = "s show | n/p next/prev | x clear | o/c modal | m/M menu | b/B status bar | q quit";

pub fn draw_ui(frame: &mut Frame, shell: &mut ShellState, now: Duration) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let manager = &shell.manager;
    let mut title_bar = TitleBar::new(
        manager.current().map(|p| p.title().to_string()),
        manager.modal_depth(),
        manager.has_menu(),
        manager.has_status_bar(),
        shell.status_message.clone(),
    );
    title_bar.render(frame, title_area);

    let length = shell.animation;
    let stage = manager.stage();
    let reserved_rows = reserved_rows(stage.reserved(now, length), main_area.height);
    let content_area = content_area(main_area, stage.bar_side(), reserved_rows);

    let mut hit_areas = Vec::new();
    for id in stage.order() {
        let Some(panel) = manager.screen(*id) else {
            continue;
        };
        let Some(rect) = panel_rect(panel, main_area, content_area, reserved_rows, now, length)
        else {
            continue;
        };
        PanelView::new(panel).render(frame, rect);
        hit_areas.push((*id, rect));
    }
    shell.hit_areas = hit_areas;

    let help = Span::styled(HELP_TEXT, Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(help, help_area);
}

fn reserved_rows(fraction: f32, available: u16) -> u16 {
    ((fraction * STATUS_BAR_HEIGHT as f32).round() as u16).min(available)
}

/// The main area minus the rows reserved for the status bar.
fn content_area(main: Rect, side: BarSide, reserved: u16) -> Rect {
    let height = main.height.saturating_sub(reserved);
    match side {
        BarSide::Top => Rect::new(main.x, main.y + reserved, main.width, height),
        BarSide::Bottom => Rect::new(main.x, main.y, main.width, height),
    }
}

/// Where a panel is drawn this frame: its resting rect for its role, shifted
/// by its current offset and clipped to the main area.
fn panel_rect(
    panel: &Panel,
    main: Rect,
    content: Rect,
    reserved: u16,
    now: Duration,
    length: Duration,
) -> Option<Rect> {
    let base = match panel.role() {
        Role::Screen => content,
        Role::Modal => Rect::new(
            content.x + 2,
            content.y + 1,
            content.width.saturating_sub(4),
            content.height.saturating_sub(2),
        ),
        Role::Menu(side) => {
            let width = (main.width as f32 * MENU_WIDTH).round() as u16;
            let x = match side {
                MenuSide::Left => main.x,
                MenuSide::Right => main.right().saturating_sub(width),
            };
            Rect::new(x, main.y, width, main.height)
        }
        // The bar grows and shrinks with the gap reserved for it.
        Role::StatusBar(side) => {
            let y = match side {
                BarSide::Top => main.y,
                BarSide::Bottom => main.bottom().saturating_sub(reserved),
            };
            Rect::new(main.x, y, main.width, reserved)
        }
    };
    shift_within(base, panel.offset(now, length), main)
}

/// `x` moves by the panel's own width; `y` by the distance to the bottom edge,
/// so a fully lowered panel leaves the bounds even when inset.
fn shift_within(base: Rect, offset: Offset, bounds: Rect) -> Option<Rect> {
    let dx = (offset.x * base.width as f32).round() as i32;
    let drop = bounds.bottom().saturating_sub(base.y);
    let dy = (offset.y * drop as f32).round() as i32;

    let left = (base.x as i32 + dx).max(bounds.x as i32);
    let top = (base.y as i32 + dy).max(bounds.y as i32);
    let right = (base.right() as i32 + dx).min(bounds.right() as i32);
    let bottom = (base.bottom() as i32 + dy).min(bounds.bottom() as i32);

    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, ShellConfig, resolve};
    use crate::core::surface::{Edge, Screen, SurfaceId, Visual};
    use crate::tui::event::TuiEvent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_shift_within_clips_to_bounds() {
        let bounds = Rect::new(0, 1, 80, 20);
        let base = Rect::new(0, 1, 80, 20);

        assert_eq!(shift_within(base, Offset::ZERO, bounds), Some(base));
        assert_eq!(shift_within(base, Offset { x: 1.0, y: 0.0 }, bounds), None);
        assert_eq!(
            shift_within(base, Offset { x: 0.5, y: 0.0 }, bounds),
            Some(Rect::new(40, 1, 40, 20))
        );
        assert_eq!(
            shift_within(base, Offset { x: -0.25, y: 0.0 }, bounds),
            Some(Rect::new(0, 1, 60, 20))
        );
    }

    #[test]
    fn test_lowered_modal_leaves_bounds() {
        let bounds = Rect::new(0, 1, 80, 20);
        let inset = Rect::new(2, 2, 76, 18);
        assert_eq!(shift_within(inset, Offset { x: 0.0, y: 1.0 }, bounds), None);
        assert!(shift_within(inset, Offset { x: 0.0, y: 0.5 }, bounds).is_some());
    }

    #[test]
    fn test_content_area_leaves_room_for_bar() {
        let main = Rect::new(0, 1, 80, 20);
        assert_eq!(content_area(main, BarSide::Top, 3), Rect::new(0, 4, 80, 17));
        assert_eq!(content_area(main, BarSide::Bottom, 3), Rect::new(0, 1, 80, 17));
        assert_eq!(reserved_rows(1.0, 20), STATUS_BAR_HEIGHT);
        assert_eq!(reserved_rows(1.0, 2), 2);
    }

    #[test]
    fn test_off_canvas_panel_is_not_drawn() {
        let main = Rect::new(0, 1, 80, 20);
        let mut panel = Panel::new(SurfaceId(2), Role::Screen, "Screen 2");
        panel.set_visual(Visual::OffCanvas(Edge::Right), true);
        panel.advance(Duration::ZERO, Duration::from_millis(100));

        let rect = panel_rect(&panel, main, main, 0, Duration::ZERO, Duration::from_millis(100));
        assert_eq!(rect, None);
    }

    #[test]
    fn test_draw_ui_renders_screen_and_records_hit_areas() {
        let config = resolve(&ShellConfig::default(), &CliOverrides::default());
        let mut shell = ShellState::new(&config);
        shell.handle_event(TuiEvent::OpenModal, Duration::ZERO);
        shell.advance(Duration::ZERO);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, &mut shell, Duration::ZERO))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("shellnav [Screen 1]"));
        assert!(text.contains("q quit"));
        // The modal is still parked below the edge, so only the screen is hit-testable.
        assert_eq!(shell.hit_areas.len(), 1);
        assert_eq!(shell.hit_test(40, 10), shell.manager.current_id());
    }
}
