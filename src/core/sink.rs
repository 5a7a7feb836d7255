//! Presentation sink - how the engine reports board changes.
//!
//! The engine takes a sink at construction and pushes one snapshot per
//! state transition. It never reaches out to any global object; views,
//! adapters, and tests all hang off this one seam.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::BoardSnapshot;

/// Receiver for full-board snapshots. Called once per engine state
/// transition; implementations render (or record) at their own pace.
pub trait BoardSink {
    fn board_changed(&mut self, snapshot: &BoardSnapshot);
}

/// Sink that discards every snapshot. Useful for headless simulation and
/// benchmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl BoardSink for NullSink {
    fn board_changed(&mut self, _snapshot: &BoardSnapshot) {}
}

/// Sink that appends every snapshot to a shared log. The handle stays
/// readable while the engine owns the sink.
#[derive(Debug, Default)]
pub struct RecordingSink {
    log: Rc<RefCell<Vec<BoardSnapshot>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle onto the snapshot log.
    pub fn log(&self) -> Rc<RefCell<Vec<BoardSnapshot>>> {
        Rc::clone(&self.log)
    }
}

impl BoardSink for RecordingSink {
    fn board_changed(&mut self, snapshot: &BoardSnapshot) {
        self.log.borrow_mut().push(snapshot.clone());
    }
}
