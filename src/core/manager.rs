//! # Screen Manager
//!
//! The root of the navigation shell and the only public surface. It owns the
//! [`ManagerState`], the [`Stage`] and both halves of transition sequencing, and
//! splits its operations across one controller per region:
//!
//! - [`primary`]: `show`, `next`, `prev`, `clear`
//! - [`modal`]: `open_modal`, `close_modal`
//! - [`menu`]: `open_menu`, `close_menu`, `has_menu`, `interact`
//! - [`status_bar`]: `open_statusbar`, `close_statusbar`, `has_status_bar`
//!
//! Every operation returns immediately. The host keeps things moving by
//! reporting elapsed time ([`ScreenManager::tick`]) and finished animations
//! ([`ScreenManager::transition_ended`]).
//!
//! The one ordering rule across regions: the menu is closed before any
//! primary-screen transition starts.

mod menu;
mod modal;
mod primary;
mod status_bar;

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::error::PreconditionError;
use crate::core::state::ManagerState;
use crate::core::surface::{BarSide, MenuSide, Screen, Stage, StageVisual, SurfaceId, Target};
use crate::core::transition::{
    Completions, DEFAULT_START_DELAY, Scheduler, TransitionEvent, TransitionEventResolver,
};

/// Animation starts waiting out the start delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    StartPrimary,
    RaiseModal(SurfaceId),
    SlideMenuIn,
    SlideStatusBarIn,
}

/// What to do once a target reports its animation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finalize {
    SettlePrimary,
    DisposeModal(SurfaceId),
    DisposeMenu,
    DisposeStatusBar,
}

/// Construction-time knobs.
#[derive(Debug, Clone)]
pub struct ManagerOptions {
    pub start_delay: Duration,
    /// Side used by `open_menu` when none is given.
    pub menu_side: MenuSide,
    /// Side used by `open_statusbar` when none is given.
    pub statusbar_side: BarSide,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            start_delay: DEFAULT_START_DELAY,
            menu_side: MenuSide::Left,
            statusbar_side: BarSide::Top,
        }
    }
}

pub struct ScreenManager<S: Screen, G: Stage> {
    state: ManagerState<S>,
    stage: G,
    scheduler: Scheduler<Deferred>,
    completions: Completions<Finalize>,
    transition_event: Option<TransitionEvent>,
    options: ManagerOptions,
}

impl<S: Screen, G: Stage> ScreenManager<S, G> {
    /// Take over `stage`. The resolver is consulted exactly once, here.
    pub fn new(
        mut stage: G,
        resolver: &dyn TransitionEventResolver,
        options: ManagerOptions,
    ) -> Self {
        stage.set_visual(StageVisual::Root, true);

        let transition_event = resolver.resolve();
        match &transition_event {
            Some(event) => info!(
                "Screen manager ready (completion event: {}, start delay: {:?})",
                event.name(),
                options.start_delay
            ),
            None => warn!("No transition completion event available; transitions will never settle"),
        }

        Self {
            state: ManagerState::new(),
            stage,
            scheduler: Scheduler::new(options.start_delay),
            completions: Completions::new(),
            transition_event,
            options,
        }
    }

    // ========================================================================
    // Host notifications
    // ========================================================================

    /// Report elapsed host time, running every animation start now due.
    pub fn tick(&mut self, elapsed: Duration) {
        for task in self.scheduler.advance(elapsed) {
            debug!("Running deferred {:?}", task);
            match task {
                Deferred::StartPrimary => self.start_primary(),
                Deferred::RaiseModal(id) => self.raise_modal(id),
                Deferred::SlideMenuIn => self.slide_menu_in(),
                Deferred::SlideStatusBarIn => self.slide_status_bar_in(),
            }
        }
    }

    /// Report that the animation on `target` finished, as host event `event`.
    ///
    /// Returns whether a waiting transition was finalized. Events other than the
    /// resolved completion event, and targets nobody listens on, are ignored.
    pub fn transition_ended(&mut self, target: Target, event: &str) -> bool {
        let Some(expected) = &self.transition_event else {
            return false;
        };
        if expected.name() != event {
            debug!("Ignoring event {event} on {:?}", target);
            return false;
        }
        let Some(finalize) = self.completions.take(target) else {
            return false;
        };

        debug!("Completion on {:?}: {:?}", target, finalize);
        match finalize {
            Finalize::SettlePrimary => self.settle_primary(),
            Finalize::DisposeModal(id) => self.dispose_modal(id),
            Finalize::DisposeMenu => self.dispose_menu(),
            Finalize::DisposeStatusBar => self.dispose_status_bar(),
        }
        true
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn current(&self) -> Option<&S> {
        self.state.primary.current.as_ref()
    }

    pub fn current_id(&self) -> Option<SurfaceId> {
        self.state.current_id()
    }

    pub fn modal_depth(&self) -> usize {
        self.state.modals.len()
    }

    /// Open modals, bottom of the stack first.
    pub fn modal_ids(&self) -> Vec<SurfaceId> {
        self.state
            .modals
            .iter()
            .map(|m| m.screen.surface_id())
            .collect()
    }

    pub fn menu_side(&self) -> Option<MenuSide> {
        self.state.menu.as_ref().map(|m| m.side)
    }

    pub fn status_bar_side(&self) -> Option<BarSide> {
        self.state.status_bar.as_ref().map(|s| s.side)
    }

    /// Any screen currently held in a slot, including ones still animating out.
    pub fn screen(&self, id: SurfaceId) -> Option<&S> {
        self.state.find(id)
    }

    pub fn screen_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.state.find_mut(id)
    }

    pub fn stage(&self) -> &G {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut G {
        &mut self.stage
    }

    pub fn transition_event(&self) -> Option<&TransitionEvent> {
        self.transition_event.as_ref()
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// True when nothing is scheduled, no completion is awaited and no primary slide is pending.
    pub fn is_settled(&self) -> bool {
        self.scheduler.is_idle()
            && self.completions.is_empty()
            && self.state.primary.pending.is_none()
    }

    /// Elapsed time at which the next deferred start becomes due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Refuse a screen that already occupies a slot.
    fn admit(&self, screen: &S) -> Result<(), PreconditionError> {
        let surface = screen.surface_id();
        if self.state.is_live(surface) {
            warn!("Rejected surface {surface}: already on stage");
            return Err(PreconditionError::SurfaceInUse { surface });
        }
        Ok(())
    }

    /// Take a screen off the stage and dispose it. The screen must already be out of the state.
    fn release(&mut self, mut screen: S) {
        let id = screen.surface_id();
        self.stage.remove(id);
        self.completions.forget(Target::Surface(id));
        screen.dispose();
        debug!("Disposed surface {id}");
    }
}
