//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::core::manager::{ManagerOptions, ScreenManager};
use crate::core::surface::{Placement, Screen, Stage, StageVisual, SurfaceId, Visual};
use crate::core::transition::FixedEvent;

/// Completion event name used by every test manager.
pub const TEST_EVENT: &str = "transitionend";

/// Everything a fake surface or stage was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Insert(SurfaceId, Placement),
    Remove(SurfaceId),
    Visual(SurfaceId, Visual, bool),
    Stage(StageVisual, bool),
    Dispose(SurfaceId),
}

/// Shared, ordered log of collaborator calls.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Entry>>>);

impl Journal {
    pub fn record(&self, entry: Entry) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.0.borrow().clone()
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.0.borrow().contains(entry)
    }

    pub fn position(&self, entry: &Entry) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == entry)
    }

    pub fn dispose_count(&self, id: SurfaceId) -> usize {
        self.count(|e| *e == Entry::Dispose(id))
    }

    pub fn inserts_of(&self, id: SurfaceId) -> usize {
        self.count(|e| matches!(e, Entry::Insert(i, _) if *i == id))
    }

    /// Disposed surfaces, in order.
    pub fn disposals(&self) -> Vec<SurfaceId> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Entry::Dispose(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Entry) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }
}

pub struct RecordingScreen {
    id: SurfaceId,
    visuals: BTreeSet<Visual>,
    journal: Journal,
}

impl RecordingScreen {
    pub fn new(id: u64, journal: &Journal) -> Self {
        Self {
            id: SurfaceId(id),
            visuals: BTreeSet::new(),
            journal: journal.clone(),
        }
    }

    pub fn has(&self, visual: Visual) -> bool {
        self.visuals.contains(&visual)
    }
}

impl Screen for RecordingScreen {
    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn set_visual(&mut self, visual: Visual, on: bool) {
        if on {
            self.visuals.insert(visual);
        } else {
            self.visuals.remove(&visual);
        }
        self.journal.record(Entry::Visual(self.id, visual, on));
    }

    fn dispose(&mut self) {
        self.journal.record(Entry::Dispose(self.id));
    }
}

pub struct RecordingStage {
    order: Vec<SurfaceId>,
    visuals: BTreeSet<StageVisual>,
    journal: Journal,
}

impl RecordingStage {
    pub fn new(journal: &Journal) -> Self {
        Self {
            order: Vec::new(),
            visuals: BTreeSet::new(),
            journal: journal.clone(),
        }
    }

    /// Attached surfaces, bottom first.
    pub fn order(&self) -> &[SurfaceId] {
        &self.order
    }

    pub fn has(&self, visual: StageVisual) -> bool {
        self.visuals.contains(&visual)
    }
}

impl Stage for RecordingStage {
    fn insert(&mut self, surface: SurfaceId, placement: Placement) {
        match placement {
            Placement::Append => self.order.push(surface),
            Placement::Prepend => self.order.insert(0, surface),
            Placement::Before(anchor) => {
                let index = self.order.iter().position(|s| *s == anchor).unwrap_or(0);
                self.order.insert(index, surface);
            }
        }
        self.journal.record(Entry::Insert(surface, placement));
    }

    fn remove(&mut self, surface: SurfaceId) {
        self.order.retain(|s| *s != surface);
        self.journal.record(Entry::Remove(surface));
    }

    fn set_visual(&mut self, visual: StageVisual, on: bool) {
        if on {
            self.visuals.insert(visual);
        } else {
            self.visuals.remove(&visual);
        }
        self.journal.record(Entry::Stage(visual, on));
    }
}

pub type TestManager = ScreenManager<RecordingScreen, RecordingStage>;

/// A manager over recording fakes, completing on [`TEST_EVENT`].
pub fn test_manager(journal: &Journal) -> TestManager {
    test_manager_with(journal, |_| {})
}

pub fn test_manager_with(journal: &Journal, configure: impl FnOnce(&mut ManagerOptions)) -> TestManager {
    let mut options = ManagerOptions::default();
    configure(&mut options);
    ScreenManager::new(RecordingStage::new(journal), &FixedEvent(TEST_EVENT), options)
}

/// Advance the clock just far enough to start every animation queued so far.
pub fn run_deferred(manager: &mut TestManager) {
    while let Some(deadline) = manager.next_deadline() {
        manager.tick(deadline);
    }
}
