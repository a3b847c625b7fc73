//! Primary screen: the one view on the base layer.
//!
//! `show` swaps instantly. `next` and `prev` slide, and only one slide may be
//! pending at a time; a second `show`/`next`/`prev` before it settles is
//! rejected with [`PreconditionError::TransitionInFlight`].

use log::{debug, warn};

use super::{Deferred, Finalize, ScreenManager};
use crate::core::error::{PreconditionError, Region};
use crate::core::state::{Direction, PendingScreen};
use crate::core::surface::{Edge, Placement, Screen, Stage, Target, Visual};
use crate::core::transition::SlotPhase;

impl<S: Screen, G: Stage> ScreenManager<S, G> {
    /// Replace the current screen without animation.
    pub fn show(&mut self, screen: S) -> Result<(), PreconditionError> {
        self.ensure_primary_idle()?;
        self.admit(&screen)?;

        let id = screen.surface_id();
        debug!("show {id}");
        self.close_menu();
        self.stage.insert(id, Placement::Append);
        self.clear();
        self.state.primary.current = Some(screen);
        Ok(())
    }

    /// Slide `screen` in from the right, on top of the current screen.
    pub fn next(&mut self, mut screen: S) -> Result<(), PreconditionError> {
        self.ensure_primary_idle()?;
        self.admit(&screen)?;

        let id = screen.surface_id();
        debug!("next {id}");
        self.close_menu();
        screen.set_visual(Visual::OffCanvas(Edge::Right), true);
        self.stage.insert(id, Placement::Append);
        self.begin_primary(screen, Direction::Forward);
        Ok(())
    }

    /// Slide the current screen out to the right, revealing `screen` beneath it.
    pub fn prev(&mut self, mut screen: S) -> Result<(), PreconditionError> {
        let Some(current) = self.state.current_id() else {
            warn!("prev rejected: no current screen");
            return Err(PreconditionError::NoCurrentScreen { operation: "prev" });
        };
        self.ensure_primary_idle()?;
        self.admit(&screen)?;

        let id = screen.surface_id();
        debug!("prev {id} (revealing under {current})");
        self.close_menu();
        screen.set_visual(Visual::Under, true);
        self.stage.insert(id, Placement::Before(current));
        self.begin_primary(screen, Direction::Backward);
        Ok(())
    }

    /// Close the menu and dispose the current screen, without animation.
    ///
    /// If a `prev` slide was moving that screen out, the slide settles at once
    /// and the revealed screen becomes current.
    pub fn clear(&mut self) {
        self.close_menu();
        let Some(screen) = self.state.primary.current.take() else {
            return;
        };
        self.release(screen);

        let outgoing_was_moving = matches!(
            &self.state.primary.pending,
            Some(p) if p.direction == Direction::Backward && p.phase == SlotPhase::Animating
        );
        if outgoing_was_moving {
            debug!("clear released the sliding screen; settling prev now");
            self.settle_primary();
        }
    }

    fn ensure_primary_idle(&self) -> Result<(), PreconditionError> {
        if self.state.primary.pending.is_some() {
            warn!("Primary transition rejected: previous one still in flight");
            return Err(PreconditionError::TransitionInFlight {
                region: Region::Primary,
            });
        }
        Ok(())
    }

    fn begin_primary(&mut self, screen: S, direction: Direction) {
        self.state.primary.pending = Some(PendingScreen {
            screen,
            direction,
            phase: SlotPhase::Scheduled,
        });
        self.scheduler.defer(Deferred::StartPrimary);
    }

    pub(super) fn start_primary(&mut self) {
        let Some(pending) = self.state.primary.pending.as_mut() else {
            return;
        };
        pending.phase = SlotPhase::Animating;

        let moving = match pending.direction {
            Direction::Forward => {
                pending.screen.set_visual(Visual::OffCanvas(Edge::Right), false);
                pending.screen.set_visual(Visual::Animating, true);
                Some(pending.screen.surface_id())
            }
            Direction::Backward => self.state.primary.current.as_mut().map(|current| {
                current.set_visual(Visual::Animating, true);
                current.set_visual(Visual::OffCanvas(Edge::Right), true);
                current.surface_id()
            }),
        };

        match moving {
            Some(id) => self
                .completions
                .listen(Target::Surface(id), Finalize::SettlePrimary),
            // The outgoing screen was cleared meanwhile; nothing left to animate.
            None => self.settle_primary(),
        }
    }

    pub(super) fn settle_primary(&mut self) {
        let Some(pending) = self.state.primary.pending.take() else {
            return;
        };
        self.clear();

        let mut screen = pending.screen;
        match pending.direction {
            Direction::Forward => screen.set_visual(Visual::Animating, false),
            Direction::Backward => screen.set_visual(Visual::Under, false),
        }
        debug!("Primary settled on {}", screen.surface_id());
        self.state.primary.current = Some(screen);
    }
}
