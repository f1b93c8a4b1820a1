use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use workshop_core::error::CoreError;
use workshop_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::extract::AppQuery;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Events a client may send over the socket.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe this connection to the notifications of `user_id`.
    Join {
        #[serde(rename = "userId")]
        user_id: DbId,
    },
}

#[derive(Debug, Deserialize)]
struct SocketParams {
    token: Option<String>,
}

/// User behind a socket upgrade, taken from the `?token=` query parameter.
///
/// Browsers cannot set headers on a WebSocket handshake, so the access token
/// travels in the query string instead of `Authorization`.
#[derive(Debug, Clone, Copy)]
pub struct SocketUser(pub DbId);

impl FromRequestParts<AppState> for SocketUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AppQuery(params) = AppQuery::<SocketParams>::from_request_parts(parts, state).await?;
        authorize_socket(params.token.as_deref(), &state.config.jwt).map(SocketUser)
    }
}

/// Resolve the user a socket may join as.
pub fn authorize_socket(token: Option<&str>, jwt: &JwtConfig) -> Result<DbId, AppError> {
    let token = token.ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing token parameter".into()))
    })?;
    let claims = validate_token(token, jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;
    Ok(claims.sub)
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// `SocketUser` runs first so an unauthenticated handshake gets a 401 JSON
/// body rather than an upgrade.
pub async fn ws_handler(
    SocketUser(user_id): SocketUser,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, user_id))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager` (not yet joined).
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound `join` events on the current task. A connection
///      may only join as the user its token belongs to.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, authenticated: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id = authenticated, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), None).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(ClientMessage::Join { user_id }) if user_id == authenticated => {
                    ws_manager.join(&conn_id, user_id).await;
                    tracing::info!(conn_id = %conn_id, user_id, "WebSocket joined");
                }
                Ok(ClientMessage::Join { user_id }) => {
                    tracing::warn!(
                        conn_id = %conn_id,
                        user_id,
                        authenticated,
                        "Rejected WebSocket join for another user"
                    );
                }
                Err(e) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring unknown WebSocket message");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
