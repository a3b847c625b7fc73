//! # Demo Shell State
//!
//! Wires terminal input to [`ScreenManager`] operations and drives the
//! manager's clock and completions from the frame loop.
//!
//! Each frame:
//!
//! ```text
//! panels/stage advance ──▶ pick up states set since the last frame
//!     │
//!     ▼
//! tick(now) ──▶ deferred starts flip visual states
//!     │
//!     ▼
//! panels/stage advance ──▶ finished tweens ──▶ transition_ended(target)
//! ```
//!
//! Input is applied at its own time: the shell is advanced to `now` before an
//! operation runs, so its start delay counts from the key press and not from
//! whenever the loop last woke up.

use std::time::Duration;

use log::{debug, info};
use ratatui::layout::{Position, Rect};

use crate::core::config::ResolvedConfig;
use crate::core::error::PreconditionError;
use crate::core::manager::ScreenManager;
use crate::core::surface::{BarSide, Interaction, MenuSide, SurfaceId, Target};
use crate::core::transition::FixedEvent;
use crate::tui::event::TuiEvent;
use crate::tui::panel::{Panel, Role};
use crate::tui::stage::TuiStage;

/// Name of the completion event this host emits when a tween settles.
pub const TRANSITION_EVENT: &str = "tween-settled";

pub type TuiManager = ScreenManager<Panel, TuiStage>;

pub struct ShellState {
    pub manager: TuiManager,
    pub status_message: String,
    /// How long one tween takes.
    pub animation: Duration,
    /// Panel rectangles from the last draw, bottom first (for hit testing).
    pub hit_areas: Vec<(SurfaceId, Rect)>,
    next_id: u64,
    /// Navigation depth shown in screen titles.
    depth: u32,
    modals_opened: u32,
}

impl ShellState {
    pub fn new(config: &ResolvedConfig) -> Self {
        let manager = ScreenManager::new(
            TuiStage::new(),
            &FixedEvent(TRANSITION_EVENT),
            config.manager_options(),
        );
        let mut shell = Self {
            manager,
            status_message: String::from("Welcome to shellnav!"),
            animation: config.animation,
            hit_areas: Vec::new(),
            next_id: 1,
            depth: 1,
            modals_opened: 0,
        };
        let home = shell.panel(Role::Screen, "Screen 1");
        if let Err(e) = shell.manager.show(home) {
            shell.status_message = format!("Rejected: {e}");
        }
        shell
    }

    fn panel(&mut self, role: Role, title: impl Into<String>) -> Panel {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        Panel::new(id, role, title)
    }

    /// Apply one input event arriving at `now`. Returns true when the shell should quit.
    pub fn handle_event(&mut self, event: TuiEvent, now: Duration) -> bool {
        debug!("Shell event: {:?}", event);
        self.advance(now);
        let outcome = match event {
            TuiEvent::Quit => return true,
            TuiEvent::Resize => return false,
            TuiEvent::Show => {
                let screen = self.panel(Role::Screen, "Screen 1");
                self.manager.show(screen).map(|()| {
                    self.depth = 1;
                    "Home".to_string()
                })
            }
            TuiEvent::Next => {
                let depth = self.depth + 1;
                let screen = self.panel(Role::Screen, format!("Screen {depth}"));
                self.manager.next(screen).map(|()| {
                    self.depth = depth;
                    format!("Forward to screen {depth}")
                })
            }
            TuiEvent::Prev => {
                let depth = self.depth.saturating_sub(1).max(1);
                let screen = self.panel(Role::Screen, format!("Screen {depth}"));
                self.manager.prev(screen).map(|()| {
                    self.depth = depth;
                    format!("Back to screen {depth}")
                })
            }
            TuiEvent::Clear => {
                self.manager.clear();
                Ok("Cleared".to_string())
            }
            TuiEvent::OpenModal => {
                let number = self.modals_opened + 1;
                let modal = self.panel(Role::Modal, format!("Modal {number}"));
                self.manager.open_modal(modal).map(|()| {
                    self.modals_opened = number;
                    format!("Modal depth {}", self.manager.modal_depth())
                })
            }
            TuiEvent::CloseModal => {
                self.manager.close_modal();
                Ok(format!("Modal depth {}", self.manager.modal_depth()))
            }
            TuiEvent::ToggleMenu(side) => self.toggle_menu(side),
            TuiEvent::ToggleStatusBar(side) => self.toggle_status_bar(side),
            TuiEvent::Click(column, row) => Ok(self.click(column, row)),
        };

        self.status_message = match outcome {
            Ok(message) => message,
            Err(e) => format!("Rejected: {e}"),
        };
        false
    }

    fn toggle_menu(&mut self, side: MenuSide) -> Result<String, PreconditionError> {
        if self.manager.has_menu() {
            self.manager.close_menu();
            return Ok("Menu closed".to_string());
        }
        let menu = self.panel(Role::Menu(side), "Menu");
        self.manager
            .open_menu(menu, Some(side))
            .map(|()| format!("Menu opened on the {}", side.label()))
    }

    fn toggle_status_bar(&mut self, side: BarSide) -> Result<String, PreconditionError> {
        if self.manager.has_status_bar() {
            self.manager.close_statusbar();
            return Ok("Status bar closed".to_string());
        }
        let bar = self.panel(Role::StatusBar(side), "Status");
        self.manager
            .open_statusbar(bar, Some(side))
            .map(|()| format!("Status bar docked at the {}", side.label()))
    }

    fn click(&mut self, column: u16, row: u16) -> String {
        let Some(id) = self.hit_test(column, row) else {
            return String::from("Nothing there");
        };
        match self.manager.interact(id) {
            Interaction::Consumed => String::from("Menu dismissed"),
            Interaction::Passthrough => {
                let title = self.manager.screen(id).map(Panel::title).unwrap_or("?");
                format!("Clicked {title}")
            }
        }
    }

    /// Topmost panel under the given cell, from the last drawn frame.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<SurfaceId> {
        let point = Position::new(column, row);
        self.hit_areas
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(point))
            .map(|(id, _)| *id)
    }

    /// Run due animation starts, step every tween and report finished ones.
    pub fn advance(&mut self, now: Duration) {
        // A start that is already due must not flip states the panels have never shown.
        self.step_panels(now);
        self.manager.tick(now);
        self.step_panels(now);
    }

    fn step_panels(&mut self, now: Duration) {
        let length = self.animation;
        let mut finished = Vec::new();
        for id in self.manager.stage().order().to_vec() {
            if let Some(panel) = self.manager.screen_mut(id)
                && panel.advance(now, length)
            {
                finished.push(Target::Surface(id));
            }
        }
        if self.manager.stage_mut().advance(now, length) {
            finished.push(Target::Stage);
        }

        for target in finished {
            if self.manager.transition_ended(target, TRANSITION_EVENT) {
                info!("Transition on {:?} settled", target);
            }
        }
    }

    /// True while anything is still moving or waiting to move.
    pub fn is_animating(&self) -> bool {
        !self.manager.is_settled()
            || self.manager.stage().is_moving()
            || self
                .manager
                .stage()
                .order()
                .iter()
                .filter_map(|id| self.manager.screen(*id))
                .any(Panel::is_moving)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, ShellConfig, resolve};
    use crate::core::surface::{Edge, Visual};

    fn shell() -> ShellState {
        let mut config = resolve(&ShellConfig::default(), &CliOverrides::default());
        config.start_delay = Duration::from_millis(50);
        config.animation = Duration::from_millis(100);
        ShellState::new(&config)
    }

    /// Step the frame loop until nothing moves.
    fn run_until_idle(shell: &mut ShellState, mut now: Duration) -> Duration {
        for _ in 0..100 {
            shell.advance(now);
            if !shell.is_animating() {
                break;
            }
            now += Duration::from_millis(10);
        }
        now
    }

    #[test]
    fn test_starts_on_first_screen() {
        let shell = shell();
        assert_eq!(shell.manager.current().map(Panel::title), Some("Screen 1"));
        assert!(!shell.is_animating());
    }

    #[test]
    fn test_next_then_prev_round_trip() {
        let mut shell = shell();
        shell.handle_event(TuiEvent::Next, Duration::ZERO);
        assert!(shell.is_animating());
        let now = run_until_idle(&mut shell, Duration::ZERO);
        assert_eq!(shell.manager.current().map(Panel::title), Some("Screen 2"));

        shell.handle_event(TuiEvent::Prev, now);
        run_until_idle(&mut shell, now);
        assert_eq!(shell.manager.current().map(Panel::title), Some("Screen 1"));
        assert_eq!(shell.manager.stage().order().len(), 1);
    }

    #[test]
    fn test_rejection_is_reported_in_status() {
        let mut shell = shell();
        shell.handle_event(TuiEvent::Next, Duration::ZERO);
        shell.handle_event(TuiEvent::Next, Duration::ZERO);
        assert!(shell.status_message.starts_with("Rejected:"));
    }

    #[test]
    fn test_next_after_idle_still_slides_in() {
        let mut shell = shell();
        shell.advance(Duration::ZERO);
        assert!(!shell.is_animating());

        let pressed = Duration::from_millis(400);
        shell.handle_event(TuiEvent::Next, pressed);
        shell.advance(pressed + Duration::from_millis(16));
        let incoming = shell.manager.stage().order()[1];
        assert!(shell.manager.screen(incoming).unwrap().has(Visual::OffCanvas(Edge::Right)));

        let now = run_until_idle(&mut shell, pressed + Duration::from_millis(32));
        assert_eq!(shell.manager.current().map(Panel::title), Some("Screen 2"));
        assert!(shell.manager.is_settled());

        shell.handle_event(TuiEvent::Next, now);
        assert!(!shell.status_message.starts_with("Rejected:"));
    }

    #[test]
    fn test_late_first_frame_still_tweens() {
        let mut shell = shell();
        shell.handle_event(TuiEvent::Next, Duration::ZERO);

        // The loop only wakes up well after the start delay.
        let late = Duration::from_millis(400);
        shell.advance(late);
        let incoming = shell.manager.stage().order()[1];
        assert!(shell.manager.screen(incoming).unwrap().is_moving());

        run_until_idle(&mut shell, late);
        assert_eq!(shell.manager.current().map(Panel::title), Some("Screen 2"));
    }

    #[test]
    fn test_modal_opened_after_idle_tweens_up() {
        let mut shell = shell();
        shell.advance(Duration::ZERO);

        let pressed = Duration::from_millis(400);
        shell.handle_event(TuiEvent::OpenModal, pressed);
        shell.advance(pressed + Duration::from_millis(50));

        let modal = shell.manager.modal_ids()[0];
        let panel = shell.manager.screen(modal).unwrap();
        assert!(panel.has(Visual::Animating));
        assert!(panel.is_moving());
    }

    #[test]
    fn test_menu_toggle_and_click_dismiss() {
        let mut shell = shell();
        shell.handle_event(TuiEvent::ToggleMenu(MenuSide::Right), Duration::ZERO);
        let now = run_until_idle(&mut shell, Duration::ZERO);
        assert!(shell.manager.has_menu());
        assert!(shell.manager.current().unwrap().has(Visual::MenuOffset(MenuSide::Right)));

        let screen = shell.manager.current_id().unwrap();
        shell.hit_areas = vec![(screen, Rect::new(0, 0, 10, 10))];
        shell.handle_event(TuiEvent::Click(2, 2), now);
        assert_eq!(shell.status_message, "Menu dismissed");

        run_until_idle(&mut shell, now);
        assert!(!shell.manager.has_menu());
    }

    #[test]
    fn test_modal_and_status_bar_cycle() {
        let mut shell = shell();
        shell.handle_event(TuiEvent::OpenModal, Duration::ZERO);
        shell.handle_event(TuiEvent::ToggleStatusBar(BarSide::Bottom), Duration::ZERO);
        let now = run_until_idle(&mut shell, Duration::ZERO);
        assert_eq!(shell.manager.modal_depth(), 1);
        assert!(shell.manager.has_status_bar());

        shell.handle_event(TuiEvent::CloseModal, now);
        shell.handle_event(TuiEvent::ToggleStatusBar(BarSide::Bottom), now);
        run_until_idle(&mut shell, now);
        assert_eq!(shell.manager.modal_depth(), 0);
        assert!(!shell.manager.has_status_bar());
        assert_eq!(shell.manager.stage().order().len(), 1);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut shell = shell();
        shell.hit_areas = vec![
            (SurfaceId(1), Rect::new(0, 0, 20, 10)),
            (SurfaceId(2), Rect::new(5, 2, 5, 5)),
        ];
        assert_eq!(shell.hit_test(6, 3), Some(SurfaceId(2)));
        assert_eq!(shell.hit_test(1, 1), Some(SurfaceId(1)));
        assert_eq!(shell.hit_test(30, 30), None);
    }
}
