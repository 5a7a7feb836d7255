//! Adapter module - remote control over TCP
//!
//! Line-delimited JSON protocol for bots and tests: swap commands in,
//! board events out. The engine runs headless in zero-delay drain mode.

pub mod protocol;
pub mod runtime;
pub mod server;

pub use protocol::{Command, Event};
pub use runtime::{serve, spawn_engine};
pub use server::{run_server, ServerConfig};
