//! Side menu: slides in from the left or right and pushes the primary screen aside.
//!
//! While the menu is up, any interaction with the primary screen closes it
//! instead of reaching the screen.

use log::{debug, warn};

use super::{Deferred, Finalize, ScreenManager};
use crate::core::error::{PreconditionError, Region};
use crate::core::state::MenuSlot;
use crate::core::surface::{Interaction, MenuSide, Placement, Screen, Stage, SurfaceId, Target, Visual};
use crate::core::transition::SlotPhase;

impl<S: Screen, G: Stage> ScreenManager<S, G> {
    /// True from the moment `open_menu` succeeds until the close animation completes.
    pub fn has_menu(&self) -> bool {
        self.state.menu.is_some()
    }

    /// Slide `menu` in from `side` (default from [`ManagerOptions`](super::ManagerOptions)).
    pub fn open_menu(&mut self, mut menu: S, side: Option<MenuSide>) -> Result<(), PreconditionError> {
        let Some(anchor) = self.state.current_id() else {
            warn!("open_menu rejected: no current screen");
            return Err(PreconditionError::NoCurrentScreen {
                operation: "open_menu",
            });
        };
        if self.state.menu.is_some() {
            warn!("open_menu rejected: a menu is already attached");
            return Err(PreconditionError::RegionOccupied { region: Region::Menu });
        }
        self.admit(&menu)?;

        let side = side.unwrap_or(self.options.menu_side);
        let id = menu.surface_id();
        debug!("open_menu {id} on the {} over {anchor}", side.label());
        menu.set_visual(Visual::OffCanvas(side.edge()), true);
        self.stage.insert(id, Placement::Append);
        self.state.menu = Some(MenuSlot {
            view: menu,
            side,
            anchor,
            phase: SlotPhase::Scheduled,
        });
        self.scheduler.defer(Deferred::SlideMenuIn);
        Ok(())
    }

    /// Slide the menu out and dispose it once it is gone.
    /// Does nothing when no menu is attached or it is already closing.
    pub fn close_menu(&mut self) {
        let phase = match &self.state.menu {
            None => return,
            Some(slot) => slot.phase,
        };

        match phase {
            SlotPhase::Closing => {}
            SlotPhase::Scheduled => {
                // Still parked off-canvas: no animation to wait for.
                self.scheduler.retract(&Deferred::SlideMenuIn);
                if let Some(slot) = self.state.menu.take() {
                    debug!("close_menu {} before it slid in", slot.view.surface_id());
                    self.release(slot.view);
                }
            }
            SlotPhase::Animating => {
                let Some(slot) = self.state.menu.as_mut() else {
                    return;
                };
                slot.phase = SlotPhase::Closing;
                slot.view.set_visual(Visual::Animating, true);
                slot.view.set_visual(Visual::OffCanvas(slot.side.edge()), true);
                let (id, anchor, side) = (slot.view.surface_id(), slot.anchor, slot.side);

                debug!("close_menu {id}");
                if let Some(screen) = self.state.find_mut(anchor) {
                    screen.set_visual(Visual::MenuOffset(side), false);
                }
                self.completions
                    .listen(Target::Surface(id), Finalize::DisposeMenu);
            }
        }
    }

    /// Route a user interaction on `surface` through the manager.
    ///
    /// An interaction on the primary screen while the menu is up closes the
    /// menu and is consumed.
    pub fn interact(&mut self, surface: SurfaceId) -> Interaction {
        let listening = matches!(
            &self.state.menu,
            Some(slot) if slot.anchor == surface && slot.phase != SlotPhase::Closing
        );
        if !listening {
            return Interaction::Passthrough;
        }
        debug!("Interaction on {surface} dismisses the menu");
        self.close_menu();
        Interaction::Consumed
    }

    pub(super) fn slide_menu_in(&mut self) {
        let Some(slot) = self.state.menu.as_mut() else {
            return;
        };
        if slot.phase != SlotPhase::Scheduled {
            return;
        }
        slot.phase = SlotPhase::Animating;
        slot.view.set_visual(Visual::OffCanvas(slot.side.edge()), false);
        slot.view.set_visual(Visual::Animating, true);

        let (anchor, side) = (slot.anchor, slot.side);
        if let Some(screen) = self.state.find_mut(anchor) {
            screen.set_visual(Visual::Animating, true);
            screen.set_visual(Visual::MenuOffset(side), true);
        }
    }

    pub(super) fn dispose_menu(&mut self) {
        if let Some(slot) = self.state.menu.take() {
            self.release(slot.view);
        }
    }
}
