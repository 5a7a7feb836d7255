//! Headless board server.
//!
//! Runs the engine without a terminal, controlled over the TCP adapter.
//! Board geometry and seed come from the environment (`GEMS_WIDTH`,
//! `GEMS_HEIGHT`, `GEMS_COLORS`, `GEMS_SEED`), the listen address from
//! `GEMS_HOST`/`GEMS_PORT`.

use std::env;

use anyhow::Result;
use log::{Level, LevelFilter, Metadata, Record};

use tui_gems::adapter::{serve, ServerConfig};
use tui_gems::core::EngineConfig;

/// Minimal stderr logger; there is no terminal UI to fight with here.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn env_u8(key: &str, default: u8) -> u8 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn engine_config_from_env() -> EngineConfig {
    let defaults = EngineConfig::default();
    EngineConfig {
        width: env_u8("GEMS_WIDTH", defaults.width),
        height: env_u8("GEMS_HEIGHT", defaults.height),
        num_colors: env_u8("GEMS_COLORS", defaults.num_colors),
        seed: env::var("GEMS_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed),
    }
}

fn main() -> Result<()> {
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Info));

    serve(engine_config_from_env(), ServerConfig::from_env())
}
