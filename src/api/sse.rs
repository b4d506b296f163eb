//! Server-Sent Events (SSE) tally subscription
//!
//! Streams the ranked snapshot to connected clients on every applied update.
//! A new subscriber receives nothing until the next update; disconnecting
//! and resubscribing skips intervening snapshots.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

use super::AppState;

/// GET /tally/updates - SSE stream of ranked snapshots
pub async fn tally_stream(
    State(app): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!(
        "New SSE subscriber, total subscribers: {}",
        app.state.subscriber_count()
    );

    let rx = app.state.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(snapshot) => {
                let event = Event::default().event("tallyUpdated").json_data(&snapshot);
                match event {
                    Ok(event) => Some(Ok(event)),
                    Err(e) => {
                        warn!("Failed to serialize tally snapshot: {}", e);
                        None
                    }
                }
            }
            Err(e) => {
                // BroadcastStream wraps RecvError (lagged), just log and continue
                warn!("SSE subscriber lagged: {:?}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
