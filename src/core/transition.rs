//! # Transition Sequencing
//!
//! Every animated change runs in two steps:
//!
//! ```text
//! call ──▶ Scheduled ──(start delay)──▶ Animating ──(completion event)──▶ Settled
//! ```
//!
//! The start delay keeps the "move into place" change out of the same frame as
//! the attachment. Renderers that see both in one frame skip the animation.
//! [`Scheduler`] holds those deferred starts against host-reported elapsed time.
//! [`Completions`] holds the one-shot listeners waiting for the host to report
//! that an animation finished.

use std::time::Duration;

use log::debug;

use crate::core::surface::Target;

/// Default start delay between attaching a surface and starting its animation.
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(50);

/// Concrete name of the "animation finished" event in the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent(pub String);

impl TransitionEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Maps the abstract "animation finished" signal to the host's concrete event.
///
/// Resolved once when the manager is built. `None` means the host cannot
/// report completions at all; transitions then never settle.
pub trait TransitionEventResolver {
    fn resolve(&self) -> Option<TransitionEvent>;
}

/// Resolver for hosts that always emit the same event.
pub struct FixedEvent(pub &'static str);

impl TransitionEventResolver for FixedEvent {
    fn resolve(&self) -> Option<TransitionEvent> {
        Some(TransitionEvent::new(self.0))
    }
}

/// Resolver for hosts with no completion signalling.
pub struct NoTransitionEvents;

impl TransitionEventResolver for NoTransitionEvents {
    fn resolve(&self) -> Option<TransitionEvent> {
        None
    }
}

/// Picks the completion event from the style properties a renderer supports,
/// checking the standard property before vendor-prefixed ones.
pub struct StylePropertyResolver<F: Fn(&str) -> bool> {
    supports: F,
}

const STYLE_PROPERTY_EVENTS: &[(&str, &str)] = &[
    ("transition", "transitionend"),
    ("OTransition", "oTransitionEnd"),
    ("MozTransition", "transitionend"),
    ("WebkitTransition", "webkitTransitionEnd"),
];

impl<F: Fn(&str) -> bool> StylePropertyResolver<F> {
    pub fn new(supports: F) -> Self {
        Self { supports }
    }
}

impl<F: Fn(&str) -> bool> TransitionEventResolver for StylePropertyResolver<F> {
    fn resolve(&self) -> Option<TransitionEvent> {
        STYLE_PROPERTY_EVENTS
            .iter()
            .find(|(property, _)| (self.supports)(property))
            .map(|(_, event)| TransitionEvent::new(*event))
    }
}

/// Where a slot is in its transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Attached, waiting for the start delay to elapse.
    Scheduled,
    /// The animation has been started.
    Animating,
    /// Leaving: the exit animation is running and the slot waits for its completion.
    Closing,
}

struct Deferred<T> {
    due: Duration,
    task: T,
}

/// Deferred animation starts, keyed on elapsed host time.
pub struct Scheduler<T> {
    now: Duration,
    delay: Duration,
    queue: Vec<Deferred<T>>,
}

impl<T: PartialEq + std::fmt::Debug> Scheduler<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            delay,
            queue: Vec::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Last elapsed time reported by the host.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue a task to run one start delay from now.
    pub fn defer(&mut self, task: T) {
        let due = self.now + self.delay;
        debug!("Deferring {:?} until {:?}", task, due);
        self.queue.push(Deferred { due, task });
    }

    /// Drop a queued task before it runs. Returns whether it was queued.
    pub fn retract(&mut self, task: &T) -> bool {
        let before = self.queue.len();
        self.queue.retain(|d| &d.task != task);
        before != self.queue.len()
    }

    /// Move the clock forward and hand back every task now due, in queue order.
    ///
    /// Time never runs backwards: an earlier `elapsed` than the last one is ignored.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        self.now = self.now.max(elapsed);
        let now = self.now;
        let (due, pending): (Vec<_>, Vec<_>) = self.queue.drain(..).partition(|d| d.due <= now);
        self.queue = pending;
        due.into_iter().map(|d| d.task).collect()
    }

    /// Earliest time at which a queued task becomes due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.iter().map(|d| d.due).min()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}

/// One-shot completion listeners, at most one per target.
pub struct Completions<F> {
    listeners: Vec<(Target, F)>,
}

impl<F: std::fmt::Debug> Completions<F> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Listen for the next completion on `target`, replacing any earlier listener there.
    pub fn listen(&mut self, target: Target, finalize: F) {
        self.forget(target);
        debug!("Listening for completion on {:?}: {:?}", target, finalize);
        self.listeners.push((target, finalize));
    }

    /// Remove and return the listener for `target`, if any.
    pub fn take(&mut self, target: Target) -> Option<F> {
        let index = self.listeners.iter().position(|(t, _)| *t == target)?;
        Some(self.listeners.remove(index).1)
    }

    pub fn forget(&mut self, target: Target) {
        self.listeners.retain(|(t, _)| *t != target);
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<F: std::fmt::Debug> Default for Completions<F> {
    fn default() -> Self {
        Self::new()
    }
}
