//! TCP server for remote board control
//!
//! Accepts one client at a time and bridges its line-delimited JSON
//! commands to the engine thread over channels. Uses tokio for async
//! networking.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use crate::adapter::protocol::{Command, Event};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables (`GEMS_HOST`, `GEMS_PORT`).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = env::var("GEMS_HOST").unwrap_or(defaults.host);
        let port = env::var("GEMS_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        Self { host, port }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Accept loop. Clients are served sequentially; a disconnect returns the
/// server to accepting. Exits when the engine side hangs up.
pub async fn run_server(
    listener: TcpListener,
    cmd_tx: mpsc::Sender<Command>,
    mut out_rx: mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        log::info!("client connected from {}", peer);

        match handle_client(stream, &cmd_tx, &mut out_rx).await {
            Ok(()) => log::info!("client {} disconnected", peer),
            Err(err) => {
                // Engine gone means shutdown; socket errors just recycle
                // the accept loop.
                if cmd_tx.is_closed() {
                    return Err(err);
                }
                log::warn!("client {} dropped: {:#}", peer, err);
            }
        }
    }
}

async fn handle_client(
    stream: TcpStream,
    cmd_tx: &mpsc::Sender<Command>,
    out_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(()); // EOF
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match Command::from_line(line) {
                    Ok(cmd) => cmd_tx
                        .send(cmd)
                        .await
                        .context("engine stopped accepting commands")?,
                    Err(err) => {
                        log::debug!("unparseable command line: {}", err);
                        let event = Event::Error {
                            seq: 0,
                            message: err.to_string(),
                        };
                        writer.write_all(event.to_line().as_bytes()).await?;
                    }
                }
            }
            event = out_rx.recv() => {
                let Some(line) = event else {
                    anyhow::bail!("engine event stream closed");
                };
                writer.write_all(line.as_bytes()).await?;
            }
        }
    }
}
