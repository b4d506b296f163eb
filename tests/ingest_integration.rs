//! End-to-end tests for the raw award-event socket
//!
//! Spawns the real accept loop on an ephemeral port and drives it with
//! plain TCP clients: initial snapshot on connect, fan-out to every client
//! on each applied update, and rejection of bad events without dropping the
//! connection.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

use medal_tally::ingest;
use medal_tally::tally::CountryTally;
use medal_tally::SharedState;

async fn start_server() -> (std::net::SocketAddr, Arc<SharedState>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(SharedState::new());
    let server_state = Arc::clone(&state);
    tokio::spawn(async move {
        let _ = ingest::run(listener, server_state).await;
    });
    (addr, state)
}

struct Client {
    lines: tokio::io::Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: std::net::SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, writer) = stream.into_split();
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    async fn send(&mut self, payload: &str) {
        self.writer
            .write_all(format!("{}\n", payload).as_bytes())
            .await
            .unwrap();
    }

    async fn recv_snapshot(&mut self) -> Vec<CountryTally> {
        let line = timeout(Duration::from_secs(5), self.lines.next_line())
            .await
            .expect("timed out waiting for snapshot")
            .unwrap()
            .expect("connection closed");
        serde_json::from_str(&line).unwrap()
    }
}

#[tokio::test]
async fn test_initial_snapshot_is_empty() {
    let (addr, _state) = start_server().await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.recv_snapshot().await, Vec::<CountryTally>::new());
}

#[tokio::test]
async fn test_initial_snapshot_reflects_prior_updates() {
    let (addr, state) = start_server().await;
    state.apply_update("NOR", medal_tally::tally::Medal::Gold);

    let mut client = Client::connect(addr).await;
    let snapshot = client.recv_snapshot().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].country, "NOR");
    assert_eq!(snapshot[0].gold, 1);
}

#[tokio::test]
async fn test_update_scenario_ranks_nor_first() {
    let (addr, _state) = start_server().await;
    let mut client = Client::connect(addr).await;
    client.recv_snapshot().await; // initial

    client.send(r#"{"country":"NOR","medal":"gold"}"#).await;
    client.recv_snapshot().await;
    client.send(r#"{"country":"USA","medal":"silver"}"#).await;
    client.recv_snapshot().await;
    client.send(r#"{"country":"NOR","medal":"silver"}"#).await;
    let snapshot = client.recv_snapshot().await;

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].country, "NOR");
    assert_eq!(
        (snapshot[0].gold, snapshot[0].silver, snapshot[0].bronze),
        (1, 1, 0)
    );
    assert_eq!(snapshot[1].country, "USA");
    assert_eq!(
        (snapshot[1].gold, snapshot[1].silver, snapshot[1].bronze),
        (0, 1, 0)
    );
}

#[tokio::test]
async fn test_fan_out_reaches_every_client() {
    let (addr, _state) = start_server().await;
    let mut sender = Client::connect(addr).await;
    let mut watcher = Client::connect(addr).await;
    // Initial snapshot confirms each connection is subscribed
    sender.recv_snapshot().await;
    watcher.recv_snapshot().await;

    sender.send(r#"{"country":"NOR","medal":"bronze"}"#).await;

    let got_sender = sender.recv_snapshot().await;
    let got_watcher = watcher.recv_snapshot().await;
    assert_eq!(got_sender, got_watcher);
    assert_eq!(got_sender[0].bronze, 1);
}

#[tokio::test]
async fn test_bad_events_are_dropped_and_connection_survives() {
    let (addr, state) = start_server().await;
    let mut client = Client::connect(addr).await;
    client.recv_snapshot().await; // initial

    client.send("this is not json").await;
    client.send(r#"{"country":"NOR","medal":"platinum"}"#).await;
    client.send(r#"{"country":"","medal":"gold"}"#).await;

    // Same connection still applies a valid event afterwards
    client.send(r#"{"country":"NOR","medal":"gold"}"#).await;
    let snapshot = client.recv_snapshot().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(
        (snapshot[0].gold, snapshot[0].silver, snapshot[0].bronze),
        (1, 0, 0)
    );
    assert_eq!(state.snapshot(), snapshot);
}

#[tokio::test]
async fn test_disconnected_client_does_not_block_others() {
    let (addr, _state) = start_server().await;
    let dropped = Client::connect(addr).await;
    let mut client = Client::connect(addr).await;
    client.recv_snapshot().await; // initial
    drop(dropped);

    client.send(r#"{"country":"SWE","medal":"silver"}"#).await;
    let snapshot = client.recv_snapshot().await;
    assert_eq!(snapshot[0].country, "SWE");
}
