//! HTTP and WebSocket routes for the salesdash server.

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Path as AxumPath, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};

#[cfg(not(feature = "embedded-frontend"))]
use axum::response::Html;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use salesdash_core::{DashboardContext, DisplaySelection, Trigger, ViewId, select};
use tower_http::cors::CorsLayer;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::DashboardSession;

#[cfg(feature = "embedded-frontend")]
use crate::embedded_frontend;

/// Application state shared across handlers.
///
/// Only holds read-only data; per-user state lives in each connection's
/// [`DashboardSession`].
pub struct AppState {
    /// Dashboard data built at startup.
    pub context: Arc<DashboardContext>,
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/ws", get(ws_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/charts", get(charts_handler))
        .route("/api/charts/{view}", get(chart_handler))
        .route("/api/select/{trigger}", get(select_handler));

    // Add frontend routes
    #[cfg(feature = "embedded-frontend")]
    let router = router
        .route("/", get(frontend_index_handler))
        .route("/static/{*path}", get(static_handler));

    #[cfg(not(feature = "embedded-frontend"))]
    let router = router.route("/", get(index_handler));

    router
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Index page handler (fallback when embedded-frontend is disabled).
#[cfg(not(feature = "embedded-frontend"))]
async fn index_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Sales Dashboard</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 2rem; background: #222; color: #eee; }
        code { background: #333; padding: 0 0.25rem; }
    </style>
</head>
<body>
    <h1>Sales Dashboard Server</h1>
    <p>WebSocket endpoint: <code>/ws</code></p>
    <ul>
        <li><code>GET /health</code> - Health check</li>
        <li><code>GET /api/summary</code> - Summary metrics</li>
        <li><code>GET /api/charts</code> - All chart figures</li>
    </ul>
    <p><em>The full UI is available with the <code>embedded-frontend</code> feature.</em></p>
</body>
</html>"#,
    )
}

/// Serve the embedded frontend index.html.
#[cfg(feature = "embedded-frontend")]
async fn frontend_index_handler() -> impl IntoResponse {
    embedded_frontend::serve_index()
}

/// Serve static assets from the embedded frontend.
#[cfg(feature = "embedded-frontend")]
async fn static_handler(AxumPath(path): AxumPath<String>) -> impl IntoResponse {
    embedded_frontend::serve_static(path)
}

/// Health check handler.
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "rows": state.context.rows(),
    }))
}

/// Summary metrics and formatted KPI cards.
async fn summary_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let metrics = state.context.metrics();
    Json(serde_json::json!({
        "metrics": metrics,
        "kpis": metrics.kpi_cards(),
        "rows": state.context.rows(),
        "dropped_rows": state.context.dropped_rows(),
    }))
}

/// Every chart in canonical order.
async fn charts_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(state.context.catalog().charts()).into_response()
}

/// One chart by view slug.
async fn chart_handler(
    State(state): State<Arc<AppState>>,
    AxumPath(view): AxumPath<String>,
) -> Response {
    match view.parse::<ViewId>() {
        Ok(view) => Json(state.context.catalog().get(view)).into_response(),
        Err(()) => error_response(StatusCode::NOT_FOUND, format!("Unknown view: {}", view)),
    }
}

/// Selection a trigger produces from the initial display.
async fn select_handler(AxumPath(trigger): AxumPath<String>) -> Response {
    match trigger.parse::<Trigger>() {
        Ok(parsed) => {
            let views = select(&DisplaySelection::all(), Some(parsed));
            Json(serde_json::json!({
                "trigger": parsed.to_string(),
                "views": views,
            }))
            .into_response()
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// WebSocket upgrade handler.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

/// Handle WebSocket connection.
async fn handle_websocket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut session = DashboardSession::new(state.context.clone());

    tracing::info!("Client connected (session {})", session.id());

    // Send initial state
    send_message(&mut sender, &session.get_state()).await;

    // Triggers are handled one at a time; each reply is sent before the next is read
    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(msg) => handle_client_message(msg, &mut session, &mut sender).await,
                Err(e) => {
                    tracing::warn!("Failed to parse client message: {} (input: {})", e, text);
                    send_message(
                        &mut sender,
                        &ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        },
                    )
                    .await;
                }
            },
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::warn!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    tracing::info!("Client disconnected (session {})", session.id());
}

/// Send a server message through the WebSocket.
async fn send_message(sender: &mut SplitSink<WebSocket, Message>, msg: &ServerMessage<'_>) {
    match serde_json::to_string(msg) {
        Ok(json) => {
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::debug!("Failed to send message: {}", e);
            }
        }
        Err(e) => tracing::error!("Failed to serialize message: {}", e),
    }
}

/// Handle a client message.
async fn handle_client_message(
    msg: ClientMessage,
    session: &mut DashboardSession,
    sender: &mut SplitSink<WebSocket, Message>,
) {
    match msg {
        ClientMessage::GetState => {
            send_message(sender, &session.get_state()).await;
        }

        ClientMessage::Trigger { id } => {
            let render = session.dispatch(&id);
            send_message(sender, &ServerMessage::from(render)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let response = error_response(StatusCode::NOT_FOUND, "Unknown view: x".to_string());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
