//! # Core Navigation Logic
//!
//! The navigation shell's state machine. It knows nothing about any specific
//! rendering technology: everything visual goes through the traits in
//! [`surface`], and time and completions are reported by the host.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │          CORE           │
//!                    │      (this module)      │
//!                    │                         │
//!                    │  • ManagerState         │
//!                    │  • ScreenManager        │
//!                    │  • Scheduler/Completions│
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │  Screen / Stage / TransitionEventResolver
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    Web     │      │   Tests    │
//!     │    Host    │      │    Host    │      │ (recording │
//!     │ (ratatui)  │      │  (future)  │      │   fakes)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`manager`]: `ScreenManager`, the public surface, and its per-region controllers
//! - [`state`]: `ManagerState`, everything the manager holds
//! - [`surface`]: collaborator traits and the closed sets of visual states
//! - [`transition`]: start-delay scheduling and completion listeners
//! - [`error`]: `PreconditionError`
//! - [`config`]: settings file and override resolution

pub mod config;
pub mod error;
pub mod manager;
pub mod state;
pub mod surface;
pub mod transition;

pub use error::{PreconditionError, Region};
pub use manager::{ManagerOptions, ScreenManager};
pub use surface::{
    BarSide, Edge, Interaction, MenuSide, Placement, Screen, Stage, StageVisual, SurfaceId,
    Target, Visual,
};
pub use transition::{
    FixedEvent, NoTransitionEvents, StylePropertyResolver, TransitionEvent,
    TransitionEventResolver,
};
