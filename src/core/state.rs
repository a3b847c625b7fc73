//! # Manager State
//!
//! Everything the manager knows, in one value. Controllers mutate it; nothing
//! else holds a reference into it.
//!
//! ```text
//! ManagerState
//! ├── primary: PrimarySlot
//! │   ├── current: Option<S>              // the active screen
//! │   └── pending: Option<PendingScreen>  // incoming screen of a next/prev
//! ├── modals: Vec<ModalEntry>             // LIFO, push = append, pop = remove-last
//! ├── closing_modals: Vec<S>              // popped, waiting for their exit animation
//! ├── menu: Option<MenuSlot>              // at most one
//! └── status_bar: Option<StatusBarSlot>   // at most one
//! ```

use crate::core::surface::{BarSide, MenuSide, Screen, SurfaceId};
use crate::core::transition::SlotPhase;

/// Direction of a primary-screen slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `next`: the incoming screen slides in from the right.
    Forward,
    /// `prev`: the current screen slides out, revealing the incoming one.
    Backward,
}

pub struct PendingScreen<S> {
    pub screen: S,
    pub direction: Direction,
    pub phase: SlotPhase,
}

pub struct PrimarySlot<S> {
    pub current: Option<S>,
    pub pending: Option<PendingScreen<S>>,
}

pub struct ModalEntry<S> {
    pub screen: S,
    pub phase: SlotPhase,
}

pub struct MenuSlot<S> {
    pub view: S,
    pub side: MenuSide,
    /// Primary screen the menu offsets and listens on.
    pub anchor: SurfaceId,
    pub phase: SlotPhase,
}

pub struct StatusBarSlot<S> {
    pub view: S,
    pub side: BarSide,
    pub phase: SlotPhase,
}

pub struct ManagerState<S> {
    pub primary: PrimarySlot<S>,
    pub modals: Vec<ModalEntry<S>>,
    pub closing_modals: Vec<S>,
    pub menu: Option<MenuSlot<S>>,
    pub status_bar: Option<StatusBarSlot<S>>,
}

impl<S: Screen> ManagerState<S> {
    pub fn new() -> Self {
        Self {
            primary: PrimarySlot {
                current: None,
                pending: None,
            },
            modals: Vec::new(),
            closing_modals: Vec::new(),
            menu: None,
            status_bar: None,
        }
    }

    /// Every screen the state currently holds, in no particular order.
    pub fn screens(&self) -> impl Iterator<Item = &S> {
        self.primary
            .current
            .iter()
            .chain(self.primary.pending.iter().map(|p| &p.screen))
            .chain(self.modals.iter().map(|m| &m.screen))
            .chain(self.closing_modals.iter())
            .chain(self.menu.iter().map(|m| &m.view))
            .chain(self.status_bar.iter().map(|s| &s.view))
    }

    pub fn find(&self, id: SurfaceId) -> Option<&S> {
        self.screens().find(|s| s.surface_id() == id)
    }

    pub fn find_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.primary
            .current
            .iter_mut()
            .chain(self.primary.pending.iter_mut().map(|p| &mut p.screen))
            .chain(self.modals.iter_mut().map(|m| &mut m.screen))
            .chain(self.closing_modals.iter_mut())
            .chain(self.menu.iter_mut().map(|m| &mut m.view))
            .chain(self.status_bar.iter_mut().map(|s| &mut s.view))
            .find(|s| s.surface_id() == id)
    }

    pub fn is_live(&self, id: SurfaceId) -> bool {
        self.find(id).is_some()
    }

    pub fn current_id(&self) -> Option<SurfaceId> {
        self.primary.current.as_ref().map(|s| s.surface_id())
    }
}

impl<S: Screen> Default for ManagerState<S> {
    fn default() -> Self {
        Self::new()
    }
}
