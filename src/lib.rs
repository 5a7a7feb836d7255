//! tui-gems: a terminal match-three puzzle.
//!
//! The `core` module is the board engine (pure logic, deterministic from
//! a seed); `input`, `term`, and `adapter` are the collaborators that
//! drive it and present it. Engines only talk to the outside world via
//! swap requests in and board snapshots out.

pub mod adapter;
pub mod core;
pub mod input;
pub mod term;
pub mod types;
