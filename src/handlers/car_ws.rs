//! WebSocket endpoint for live car editing
//!
//! `GET /ws?id_car=ABC123` upgrades to a WebSocket subscribed to one car.
//! Every text or binary frame is handed to the car dispatcher, one at a time,
//! and the connection receives an `UpdateCar` snapshot whenever the car changes.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{api_error, ApiError};
use crate::services::car_dispatcher::CarDispatcher;
use crate::services::car_registry::connection_queue;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CarWsQuery {
    pub id_car: Option<String>,
}

/// GET /ws?id_car=
pub async fn car_websocket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<CarWsQuery>,
) -> Result<Response, ApiError> {
    let id_car = query
        .id_car
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "id_car is required"))?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, id_car)))
}

async fn handle_socket(socket: WebSocket, state: AppState, id_car: String) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = connection_queue();

    // Outbound frames go through the queue so broadcasts never wait on this socket
    let mut writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sink.send(msg).await {
                debug!(error = %e, "WebSocket send failed");
                break;
            }
        }
        let _ = sink.close().await;
    });

    let subscription = state.registry.subscribe(&id_car, tx);
    let dispatcher = CarDispatcher::new(state.db.clone(), state.registry.clone());

    info!(id_car = %id_car, "Live connection opened");

    loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = dispatcher.handle_message(text.as_str()).await {
                            warn!(id_car = %id_car, error = %e, "Dropped live message");
                        }
                    }
                    Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                        Ok(text) => {
                            if let Err(e) = dispatcher.handle_message(text).await {
                                warn!(id_car = %id_car, error = %e, "Dropped live message");
                            }
                        }
                        Err(e) => {
                            warn!(id_car = %id_car, error = %e, "Dropped live message that is not UTF-8");
                        }
                    },
                    Some(Ok(Message::Close(_))) => {
                        debug!(id_car = %id_car, "Live connection closed by client");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(id_car = %id_car, error = %e, "Live connection read error");
                        break;
                    }
                    None => break,
                }
            }
            _ = &mut writer => {
                debug!(id_car = %id_car, "Live connection writer finished");
                break;
            }
        }
    }

    drop(subscription);
    writer.abort();

    info!(id_car = %id_car, "Live connection closed");
}
