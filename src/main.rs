//! Terminal match-three runner (default binary).
//!
//! Crossterm input, full-frame rendering, and a cooldown-paced engine
//! driver so cascades resolve visibly one step at a time.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_gems::core::{BoardSink, BoardSnapshot, Engine, EngineConfig};
use tui_gems::input::{handle_key_event, should_quit, SelectionState};
use tui_gems::term::{GameView, TerminalRenderer, Viewport};
use tui_gems::types::{EngineState, BOARD_REFRESH_MS, TICK_MS};

/// Sink keeping only the most recent snapshot for the render loop.
struct SharedSnapshot {
    slot: Rc<RefCell<Option<BoardSnapshot>>>,
}

impl BoardSink for SharedSnapshot {
    fn board_changed(&mut self, snapshot: &BoardSnapshot) {
        *self.slot.borrow_mut() = Some(snapshot.clone());
    }
}

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let slot = Rc::new(RefCell::new(None));
    let sink = SharedSnapshot {
        slot: Rc::clone(&slot),
    };

    let config = EngineConfig::default();
    let mut engine = Engine::new(config, Box::new(sink))?;
    let mut selection = SelectionState::new(config.width, config.height);

    let view = GameView::default();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let step_cooldown = Duration::from_millis(BOARD_REFRESH_MS as u64);
    let mut last_step = Instant::now();

    loop {
        // Render the latest pushed snapshot.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snapshot = slot
            .borrow()
            .clone()
            .unwrap_or_else(|| engine.snapshot());
        let fb = view.render(&snapshot, &selection, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input.
        if event::poll(tick_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Some(swap) = selection.apply(action) {
                            engine.try_swap(swap.a, swap.b);
                        }
                    }
                }
            }
        }

        // Advance the engine one step per cooldown window, so clears and
        // refills show up as discrete visible moves.
        if engine.state() != EngineState::WaitingForInput
            && last_step.elapsed() >= step_cooldown
        {
            engine.tick();
            last_step = Instant::now();
        }
    }
}
