//! # Terminal Stage
//!
//! The terminal host's [`Stage`]: the z-ordered list of attached panels plus
//! the space reserved for a docked status bar. That space tweens the same way
//! panels do, and its settling is reported on [`Target::Stage`](crate::core::surface::Target).

use std::collections::BTreeSet;
use std::time::Duration;

use log::debug;

use crate::core::surface::{BarSide, Placement, Stage, StageVisual, SurfaceId};
use crate::tui::panel::{Motion, Offset};

pub struct TuiStage {
    order: Vec<SurfaceId>,
    visuals: BTreeSet<StageVisual>,
    /// Reserved status bar space as `y` in 0.0..=1.0.
    reserve: Motion,
    /// Side of the last docked bar, kept while the gap closes.
    bar_side: BarSide,
}

impl TuiStage {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            visuals: BTreeSet::new(),
            reserve: Motion::at_rest(Offset::ZERO),
            bar_side: BarSide::Top,
        }
    }

    /// Attached surfaces, bottom first.
    pub fn order(&self) -> &[SurfaceId] {
        &self.order
    }

    pub fn has(&self, visual: StageVisual) -> bool {
        self.visuals.contains(&visual)
    }

    pub fn bar_side(&self) -> BarSide {
        self.bar_side
    }

    pub fn is_moving(&self) -> bool {
        !self.reserve.is_settled()
    }

    /// Fraction of the status bar's height currently reserved.
    pub fn reserved(&self, now: Duration, length: Duration) -> f32 {
        self.reserve.position(now, length).y
    }

    /// Follow any change of visual state. Returns true when the gap just finished moving.
    pub fn advance(&mut self, now: Duration, length: Duration) -> bool {
        let docked = self
            .visuals
            .iter()
            .any(|v| matches!(v, StageVisual::StatusBarOffset(_)));
        let target = Offset {
            x: 0.0,
            y: if docked { 1.0 } else { 0.0 },
        };
        if target != self.reserve.target() {
            let animate = self.has(StageVisual::StatusBarAnimating);
            self.reserve.retarget(target, now, length, animate);
        }
        self.reserve.finish_if_due(now, length)
    }
}

impl Default for TuiStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for TuiStage {
    fn insert(&mut self, surface: SurfaceId, placement: Placement) {
        match placement {
            Placement::Append => self.order.push(surface),
            Placement::Prepend => self.order.insert(0, surface),
            Placement::Before(anchor) => {
                let index = self.order.iter().position(|s| *s == anchor).unwrap_or(0);
                self.order.insert(index, surface);
            }
        }
        debug!("Stage order: {:?}", self.order);
    }

    fn remove(&mut self, surface: SurfaceId) {
        self.order.retain(|s| *s != surface);
    }

    fn set_visual(&mut self, visual: StageVisual, on: bool) {
        if let (StageVisual::StatusBarOffset(side), true) = (visual, on) {
            self.bar_side = side;
        }
        if on {
            self.visuals.insert(visual);
        } else {
            self.visuals.remove(&visual);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENGTH: Duration = Duration::from_millis(200);

    #[test]
    fn test_insert_before_anchor() {
        let mut stage = TuiStage::new();
        stage.insert(SurfaceId(1), Placement::Append);
        stage.insert(SurfaceId(2), Placement::Append);
        stage.insert(SurfaceId(3), Placement::Before(SurfaceId(2)));
        stage.insert(SurfaceId(4), Placement::Prepend);

        assert_eq!(
            stage.order(),
            &[SurfaceId(4), SurfaceId(1), SurfaceId(3), SurfaceId(2)]
        );
        stage.remove(SurfaceId(1));
        assert_eq!(stage.order(), &[SurfaceId(4), SurfaceId(3), SurfaceId(2)]);
    }

    #[test]
    fn test_reserve_tweens_open_and_closed() {
        let mut stage = TuiStage::new();
        stage.set_visual(StageVisual::StatusBarAnimating, true);
        stage.set_visual(StageVisual::StatusBarOffset(BarSide::Bottom), true);
        assert_eq!(stage.bar_side(), BarSide::Bottom);

        assert!(!stage.advance(Duration::ZERO, LENGTH));
        assert!(stage.is_moving());
        assert!(stage.advance(LENGTH, LENGTH));
        assert_eq!(stage.reserved(LENGTH, LENGTH), 1.0);

        stage.set_visual(StageVisual::StatusBarOffset(BarSide::Bottom), false);
        stage.set_visual(StageVisual::StatusBarClosing, true);
        assert!(!stage.advance(LENGTH, LENGTH));
        assert!(stage.advance(LENGTH * 2, LENGTH));
        assert_eq!(stage.reserved(LENGTH * 2, LENGTH), 0.0);
        // Side is remembered while the gap closes.
        assert_eq!(stage.bar_side(), BarSide::Bottom);
    }
}
