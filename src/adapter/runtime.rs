//! Adapter runtime integration.
//!
//! Bridges the synchronous engine with the async TCP server: the engine
//! runs on a dedicated thread in zero-delay drain mode, commands arrive
//! over an mpsc channel, and every snapshot the engine pushes goes out as
//! a board event line.

use std::thread;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::adapter::protocol::{position, Command, Event};
use crate::adapter::server::{run_server, ServerConfig};
use crate::core::{BoardSink, BoardSnapshot, Engine, EngineConfig};

/// Commands the engine thread can buffer before the server applies
/// backpressure to the client.
const MAX_PENDING_COMMANDS: usize = 32;

/// Sink that serializes every snapshot onto the outbound wire channel.
struct ChannelSink {
    out: mpsc::UnboundedSender<String>,
}

impl BoardSink for ChannelSink {
    fn board_changed(&mut self, snapshot: &BoardSnapshot) {
        // Stream events carry seq 0; a closed channel means shutdown.
        let _ = self.out.send(Event::board(0, snapshot).to_line());
    }
}

/// Run the engine until the command channel closes. Swaps are answered
/// with a result event and then drained synchronously, so the client sees
/// the whole cascade as a burst of board events.
pub fn spawn_engine(
    config: EngineConfig,
    mut cmd_rx: mpsc::Receiver<Command>,
    out_tx: mpsc::UnboundedSender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let sink = ChannelSink {
            out: out_tx.clone(),
        };
        let mut engine = match Engine::new(config, Box::new(sink)) {
            Ok(engine) => engine,
            Err(err) => {
                log::error!("engine construction failed: {}", err);
                return;
            }
        };

        while let Some(cmd) = cmd_rx.blocking_recv() {
            match cmd {
                Command::Swap { seq, a, b } => {
                    let accepted = engine.try_swap(position(a), position(b));
                    let event = Event::Result { seq, accepted };
                    if out_tx.send(event.to_line()).is_err() {
                        return;
                    }
                    engine.drain();
                }
                Command::Board { seq } => {
                    let event = Event::board(seq, &engine.snapshot());
                    if out_tx.send(event.to_line()).is_err() {
                        return;
                    }
                }
            }
        }
    })
}

/// Blocking entry point for the headless server binary.
pub fn serve(engine_config: EngineConfig, server_config: ServerConfig) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel(MAX_PENDING_COMMANDS);
    let (out_tx, out_rx) = mpsc::unbounded_channel();

    let _engine = spawn_engine(engine_config, cmd_rx, out_tx);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let addr = server_config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        log::info!("listening on {}", addr);
        run_server(listener, cmd_tx, out_rx).await
    })
}
