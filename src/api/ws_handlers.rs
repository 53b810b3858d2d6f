//! WebSocket handler streaming document change events

use super::handlers::DashboardState;
use crate::events::ChangeEvent;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::collections::HashSet;
use tokio::time::{interval, Duration};
use tracing::{debug, warn};

/// Query parameters for filtering WebSocket events
#[derive(Debug, Deserialize, Default)]
pub struct WsQuery {
    /// Comma-separated document kinds to subscribe to (e.g. "tasks,activity")
    pub documents: Option<String>,
}

/// WebSocket upgrade handler for `/ws/events`
pub async fn ws_events(
    ws: WebSocketUpgrade,
    State(state): State<DashboardState>,
    Query(query): Query<WsQuery>,
) -> impl IntoResponse {
    let document_filter = parse_filter(query.documents.as_deref());
    ws.on_upgrade(move |socket| handle_ws(socket, state, document_filter))
}

fn parse_filter(documents: Option<&str>) -> Option<HashSet<String>> {
    documents.map(|kinds| {
        kinds
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

/// Revalidation events carry no document and always pass.
fn passes_filter(event: &ChangeEvent, filter: &Option<HashSet<String>>) -> bool {
    match (filter, event.document) {
        (Some(filter), Some(document)) => filter.contains(document.as_str()),
        _ => true,
    }
}

/// Handle an individual WebSocket connection
async fn handle_ws(
    socket: WebSocket,
    state: DashboardState,
    document_filter: Option<HashSet<String>>,
) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut event_rx = state.event_bus.subscribe();

    // Ping interval (30s)
    let mut ping_interval = interval(Duration::from_secs(30));
    // Skip the first immediate tick
    ping_interval.tick().await;

    debug!(
        filter = ?document_filter,
        subscribers = state.event_bus.subscriber_count(),
        "WebSocket events client connected"
    );

    loop {
        tokio::select! {
            result = event_rx.recv() => {
                match result {
                    Ok(event) => {
                        if !passes_filter(&event, &document_filter) {
                            continue;
                        }
                        match serde_json::to_string(&event) {
                            Ok(json) => {
                                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                                    debug!("WebSocket send failed, client disconnected");
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!("Failed to serialize ChangeEvent: {}", e);
                            }
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "WebSocket client lagged, skipping events");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Event bus closed, shutting down WebSocket");
                        break;
                    }
                }
            }

            // Send periodic pings to detect dead clients
            _ = ping_interval.tick() => {
                if ws_sender.send(Message::Ping(vec![].into())).await.is_err() {
                    debug!("Ping failed, client disconnected");
                    break;
                }
            }

            msg = ws_receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {}", e);
                        break;
                    }
                    // Pongs and client text are ignored
                    _ => {}
                }
            }
        }
    }

    debug!("WebSocket connection closed");
}
