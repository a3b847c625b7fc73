//! Modal stack: overlays slide up from the bottom edge and leave in LIFO order.

use log::debug;

use super::{Deferred, Finalize, ScreenManager};
use crate::core::error::PreconditionError;
use crate::core::state::ModalEntry;
use crate::core::surface::{Edge, Placement, Screen, Stage, SurfaceId, Target, Visual};
use crate::core::transition::SlotPhase;

impl<S: Screen, G: Stage> ScreenManager<S, G> {
    /// Push `screen` onto the modal stack and slide it up into place.
    pub fn open_modal(&mut self, mut screen: S) -> Result<(), PreconditionError> {
        self.admit(&screen)?;

        let id = screen.surface_id();
        debug!("open_modal {id} (depth {})", self.state.modals.len() + 1);
        screen.set_visual(Visual::OffCanvas(Edge::Bottom), true);
        self.stage.insert(id, Placement::Append);
        self.state.modals.push(ModalEntry {
            screen,
            phase: SlotPhase::Scheduled,
        });
        self.scheduler.defer(Deferred::RaiseModal(id));
        Ok(())
    }

    /// Slide the topmost modal down and dispose it once it is out of view.
    /// Does nothing when no modal is open.
    pub fn close_modal(&mut self) {
        let Some(entry) = self.state.modals.pop() else {
            debug!("close_modal: stack empty");
            return;
        };

        let mut screen = entry.screen;
        let id = screen.surface_id();
        debug!("close_modal {id}");
        if entry.phase == SlotPhase::Scheduled {
            // Never started moving, so no completion will come.
            self.scheduler.retract(&Deferred::RaiseModal(id));
            self.release(screen);
            return;
        }

        screen.set_visual(Visual::Animating, true);
        screen.set_visual(Visual::OffCanvas(Edge::Bottom), true);
        self.state.closing_modals.push(screen);
        self.completions
            .listen(Target::Surface(id), Finalize::DisposeModal(id));
    }

    pub(super) fn raise_modal(&mut self, id: SurfaceId) {
        let Some(entry) = self
            .state
            .modals
            .iter_mut()
            .find(|m| m.screen.surface_id() == id)
        else {
            return;
        };
        entry.screen.set_visual(Visual::OffCanvas(Edge::Bottom), false);
        entry.screen.set_visual(Visual::Animating, true);
        entry.phase = SlotPhase::Animating;
    }

    pub(super) fn dispose_modal(&mut self, id: SurfaceId) {
        let Some(index) = self
            .state
            .closing_modals
            .iter()
            .position(|s| s.surface_id() == id)
        else {
            return;
        };
        let screen = self.state.closing_modals.remove(index);
        self.release(screen);
    }
}
