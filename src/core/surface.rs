//! # Surfaces
//!
//! The collaborator contract between the manager and whatever renders it.
//! The manager never draws anything. It only decides *where* a surface sits
//! and which visual states are switched on, then waits for the host to say
//! an animation has finished.
//!
//! ```text
//! ScreenManager ──insert/remove/set_visual──▶ Stage   (the manager's own container)
//!       │
//!       └────────set_visual/dispose─────────▶ Screen  (every view it places)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a renderable surface, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side a menu slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize, Serialize)]
pub enum MenuSide {
    #[serde(rename = "left")]
    #[default]
    Left,
    #[serde(rename = "right")]
    Right,
}

impl MenuSide {
    pub fn label(self) -> &'static str {
        match self {
            MenuSide::Left => "left",
            MenuSide::Right => "right",
        }
    }

    pub fn edge(self) -> Edge {
        match self {
            MenuSide::Left => Edge::Left,
            MenuSide::Right => Edge::Right,
        }
    }
}

/// Which edge a status bar is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize, Serialize)]
pub enum BarSide {
    #[serde(rename = "top")]
    #[default]
    Top,
    #[serde(rename = "bottom")]
    Bottom,
}

impl BarSide {
    pub fn label(self) -> &'static str {
        match self {
            BarSide::Top => "top",
            BarSide::Bottom => "bottom",
        }
    }
}

/// Canvas edge a surface is parked beyond while off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    Left,
    Right,
    Bottom,
}

/// Visual states the manager toggles on a screen. Interpreted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visual {
    /// Parked outside the canvas beyond the given edge.
    OffCanvas(Edge),
    /// Sits beneath the current screen, waiting to be revealed.
    Under,
    /// Position changes are animated rather than applied instantly.
    Animating,
    /// Shifted aside to make room for a menu on the given side.
    MenuOffset(MenuSide),
}

/// Visual states the manager toggles on its own stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageVisual {
    /// Marks the container as managed. Set once at construction.
    Root,
    /// Status bar offset changes are animated.
    StatusBarAnimating,
    /// Content is pushed away from the docked status bar.
    StatusBarOffset(BarSide),
    /// The gap left by a departing status bar is closing.
    StatusBarClosing,
}

/// Where a surface goes when attached to the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// On top of everything already attached.
    Append,
    /// Beneath everything already attached.
    Prepend,
    /// Directly beneath the given surface.
    Before(SurfaceId),
}

/// A view the manager can place, animate and release.
pub trait Screen {
    /// Identity used to route completion and interaction notifications.
    fn surface_id(&self) -> SurfaceId;

    /// Switch a visual state on or off.
    fn set_visual(&mut self, visual: Visual, on: bool);

    /// Release the view's resources. Called exactly once, after it left the stage.
    fn dispose(&mut self);
}

/// The manager's own container surface.
pub trait Stage {
    fn insert(&mut self, surface: SurfaceId, placement: Placement);

    fn remove(&mut self, surface: SurfaceId);

    fn set_visual(&mut self, visual: StageVisual, on: bool);
}

/// Where a completion notification or a listener is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Stage,
    Surface(SurfaceId),
}

/// Outcome of routing a user interaction through the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// The manager acted on it. The host must suppress its default effect and propagation.
    Consumed,
    /// Nothing was listening. The host handles the interaction as usual.
    Passthrough,
}
