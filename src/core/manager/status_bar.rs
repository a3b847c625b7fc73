//! Status bar: docks at the top or bottom and pushes the content away from it.
//!
//! Unlike the menu, closing animates the *stage* (the gap closes), so the
//! completion that releases the bar is reported on [`Target::Stage`].

use log::{debug, warn};

use super::{Deferred, Finalize, ScreenManager};
use crate::core::error::{PreconditionError, Region};
use crate::core::state::StatusBarSlot;
use crate::core::surface::{BarSide, Placement, Screen, Stage, StageVisual, Target, Visual};
use crate::core::transition::SlotPhase;

impl<S: Screen, G: Stage> ScreenManager<S, G> {
    pub fn has_status_bar(&self) -> bool {
        self.state.status_bar.is_some()
    }

    /// Dock `bar` on `side` (default from [`ManagerOptions`](super::ManagerOptions)).
    pub fn open_statusbar(&mut self, bar: S, side: Option<BarSide>) -> Result<(), PreconditionError> {
        if self.state.primary.current.is_none() {
            warn!("open_statusbar rejected: no current screen");
            return Err(PreconditionError::NoCurrentScreen {
                operation: "open_statusbar",
            });
        }
        if self.state.status_bar.is_some() {
            warn!("open_statusbar rejected: a status bar is already attached");
            return Err(PreconditionError::RegionOccupied {
                region: Region::StatusBar,
            });
        }
        self.admit(&bar)?;

        let side = side.unwrap_or(self.options.statusbar_side);
        let id = bar.surface_id();
        debug!("open_statusbar {id} at the {}", side.label());
        self.stage.insert(id, Placement::Append);
        self.state.status_bar = Some(StatusBarSlot {
            view: bar,
            side,
            phase: SlotPhase::Scheduled,
        });
        self.scheduler.defer(Deferred::SlideStatusBarIn);
        Ok(())
    }

    /// Close the gap left by the status bar and dispose it once closed.
    /// Does nothing when no status bar is attached or it is already closing.
    pub fn close_statusbar(&mut self) {
        let phase = match &self.state.status_bar {
            None => return,
            Some(slot) => slot.phase,
        };

        match phase {
            SlotPhase::Closing => {}
            SlotPhase::Scheduled => {
                self.scheduler.retract(&Deferred::SlideStatusBarIn);
                if let Some(slot) = self.state.status_bar.take() {
                    debug!("close_statusbar {} before it docked", slot.view.surface_id());
                    self.release(slot.view);
                }
            }
            SlotPhase::Animating => {
                let Some(slot) = self.state.status_bar.as_mut() else {
                    return;
                };
                slot.phase = SlotPhase::Closing;
                let side = slot.side;

                debug!("close_statusbar {}", slot.view.surface_id());
                self.stage.set_visual(StageVisual::StatusBarOffset(side), false);
                self.stage.set_visual(StageVisual::StatusBarClosing, true);
                self.completions
                    .listen(Target::Stage, Finalize::DisposeStatusBar);
            }
        }
    }

    pub(super) fn slide_status_bar_in(&mut self) {
        let Some(slot) = self.state.status_bar.as_mut() else {
            return;
        };
        if slot.phase != SlotPhase::Scheduled {
            return;
        }
        slot.phase = SlotPhase::Animating;
        let side = slot.side;

        if let Some(screen) = self.state.primary.current.as_mut() {
            screen.set_visual(Visual::Animating, true);
        }
        self.stage.set_visual(StageVisual::StatusBarAnimating, true);
        self.stage.set_visual(StageVisual::StatusBarOffset(side), true);
    }

    pub(super) fn dispose_status_bar(&mut self) {
        let Some(slot) = self.state.status_bar.take() else {
            return;
        };
        self.stage.set_visual(StageVisual::StatusBarClosing, false);
        self.stage.set_visual(StageVisual::StatusBarAnimating, false);
        self.release(slot.view);
    }
}
