//! # Panels
//!
//! The terminal host's [`Screen`]. A panel turns its visual states into a
//! target offset and tweens toward it, but only while `Animating` is on;
//! otherwise it jumps straight there. A finished tween is what the host
//! reports back to the manager as a completed transition.

use std::collections::BTreeSet;
use std::time::Duration;

use log::debug;

use crate::core::surface::{BarSide, Edge, MenuSide, Screen, SurfaceId, Visual};

/// Fraction of the stage width a side menu takes.
pub const MENU_WIDTH: f32 = 0.4;

/// What a panel is used for; decides its resting geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Screen,
    Modal,
    Menu(MenuSide),
    StatusBar(BarSide),
}

/// Offset in units of the panel's own width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    fn lerp(self, to: Offset, t: f32) -> Offset {
        Offset {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// A tween between two offsets.
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    from: Offset,
    to: Offset,
    started: Duration,
    settled: bool,
}

impl Motion {
    pub fn at_rest(at: Offset) -> Self {
        Self {
            from: at,
            to: at,
            started: Duration::ZERO,
            settled: true,
        }
    }

    pub fn target(&self) -> Offset {
        self.to
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Where the tween is at `now`, eased out.
    pub fn position(&self, now: Duration, length: Duration) -> Offset {
        if self.settled || length.is_zero() {
            return self.to;
        }
        let t = (now.saturating_sub(self.started).as_secs_f32() / length.as_secs_f32()).min(1.0);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from.lerp(self.to, eased)
    }

    /// Retarget to `to`, animating from wherever the tween is now or jumping.
    pub fn retarget(&mut self, to: Offset, now: Duration, length: Duration, animate: bool) {
        if animate {
            let from = self.position(now, length);
            *self = Self {
                from,
                to,
                started: now,
                settled: false,
            };
        } else {
            *self = Self::at_rest(to);
        }
    }

    /// Returns true exactly once, on the frame the tween reaches its target.
    pub fn finish_if_due(&mut self, now: Duration, length: Duration) -> bool {
        if self.settled || now < self.started + length {
            return false;
        }
        self.settled = true;
        true
    }
}

pub struct Panel {
    id: SurfaceId,
    role: Role,
    title: String,
    visuals: BTreeSet<Visual>,
    motion: Motion,
    disposed: bool,
}

impl Panel {
    pub fn new(id: SurfaceId, role: Role, title: impl Into<String>) -> Self {
        Self {
            id,
            role,
            title: title.into(),
            visuals: BTreeSet::new(),
            motion: Motion::at_rest(Offset::ZERO),
            disposed: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn has(&self, visual: Visual) -> bool {
        self.visuals.contains(&visual)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_moving(&self) -> bool {
        !self.motion.is_settled()
    }

    pub fn offset(&self, now: Duration, length: Duration) -> Offset {
        self.motion.position(now, length)
    }

    /// Resting offset implied by the current visual states.
    pub fn target_offset(&self) -> Offset {
        let mut offset = Offset::ZERO;
        for visual in &self.visuals {
            match visual {
                Visual::OffCanvas(Edge::Left) => offset.x -= 1.0,
                Visual::OffCanvas(Edge::Right) => offset.x += 1.0,
                Visual::OffCanvas(Edge::Bottom) => offset.y += 1.0,
                Visual::MenuOffset(MenuSide::Left) => offset.x += MENU_WIDTH,
                Visual::MenuOffset(MenuSide::Right) => offset.x -= MENU_WIDTH,
                Visual::Under | Visual::Animating => {}
            }
        }
        offset
    }

    /// Follow any change of visual state. Returns true when a tween just finished.
    pub fn advance(&mut self, now: Duration, length: Duration) -> bool {
        let target = self.target_offset();
        if target != self.motion.target() {
            let animate = self.has(Visual::Animating);
            self.motion.retarget(target, now, length, animate);
        }
        self.motion.finish_if_due(now, length)
    }
}

impl Screen for Panel {
    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn set_visual(&mut self, visual: Visual, on: bool) {
        if on {
            self.visuals.insert(visual);
        } else {
            self.visuals.remove(&visual);
        }
    }

    fn dispose(&mut self) {
        debug!("Panel '{}' disposed", self.title);
        self.disposed = true;
    }
}
