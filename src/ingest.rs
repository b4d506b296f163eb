//! Raw-socket event ingress and fan-out
//!
//! TCP listener for award events, newline-delimited JSON. Each connection
//! receives the current ranked snapshot on connect, then one snapshot line
//! per applied update (its own updates included). Incoming lines are decoded
//! and validated; bad events are logged and dropped without touching state,
//! and the connection stays open.

use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::state::SharedState;
use crate::tally::{Medal, TallySnapshot};

/// Award event as received on the wire
#[derive(Debug, Deserialize)]
struct UpdateEvent {
    country: String,
    medal: String,
}

/// Decode and validate one incoming payload.
///
/// Decode failures and validation failures (empty country, unknown medal)
/// are both rejection reasons; neither mutates state.
fn parse_event(payload: &str) -> Result<(String, Medal)> {
    let event: UpdateEvent = serde_json::from_str(payload)?;
    if event.country.is_empty() {
        return Err(Error::Validation("country must be non-empty".to_string()));
    }
    let medal = event.medal.parse::<Medal>()?;
    Ok((event.country, medal))
}

/// Accept loop for the award-event socket.
///
/// Spawns one task per connection; a failing connection ends only its own
/// task.
pub async fn run(listener: TcpListener, state: Arc<SharedState>) -> Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        debug!("Socket client connected from {}", addr);
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, state).await {
                debug!("Socket client {} closed: {}", addr, e);
            }
        });
    }
}

async fn handle_connection(stream: TcpStream, state: Arc<SharedState>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    // Subscribe before sending the initial snapshot so no update published
    // after the send is missed.
    let mut snapshot_rx = state.subscribe();
    send_snapshot(&mut writer, &state.snapshot()).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(payload) => match parse_event(&payload) {
                        Ok((country, medal)) => {
                            state.apply_update(&country, medal);
                        }
                        Err(e) => {
                            // Reject and keep the connection open
                            warn!("Dropping bad award event: {}", e);
                        }
                    },
                    None => break, // client closed the read side
                }
            }
            snapshot = snapshot_rx.recv() => {
                match snapshot {
                    Ok(snapshot) => send_snapshot(&mut writer, &snapshot).await?,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                        // Slow reader: skip to the latest snapshot
                        warn!("Socket client lagged, skipped {} snapshots", missed);
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    Ok(())
}

async fn send_snapshot(writer: &mut OwnedWriteHalf, snapshot: &TallySnapshot) -> Result<()> {
    let mut line = serde_json::to_string(snapshot)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    Ok(())
}

/// Bind the ingress listener and log the endpoint
pub async fn bind(port: u16) -> Result<TcpListener> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Award event socket listening on port {}", port);
    Ok(listener)
}
