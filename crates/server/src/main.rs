use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};
use uuid::Uuid;

use dataset::Dataset;
use session::{InputEvent, Session};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ClientRequest, FilePayload, ServerEvent},
};

mod config;

use config::load_settings;

const INDEX_HTML: &str = include_str!("../assets/index.html");

type SessionRegistry = RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>;

#[derive(Clone)]
struct AppState {
    dataset: Arc<Dataset>,
    sessions: Arc<SessionRegistry>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let dataset = Dataset::load(&settings.dataset_path).map_err(|err| {
        error!(
            path = %settings.dataset_path,
            %err,
            "failed to load dataset; the server cannot start without it"
        );
        err
    })?;

    let state = AppState {
        dataset: Arc::new(dataset),
        sessions: Arc::new(RwLock::new(HashMap::new())),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/sessions/:session_id/download", get(download_sample))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

/// The download button's target. Reads the session's store passively via the
/// control surface; never triggers a resample.
async fn download_sample(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let session = state
        .sessions
        .read()
        .await
        .get(&session_id)
        .cloned()
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(ErrorCode::NotFound, "unknown session")),
            )
        })?;

    let events = session
        .lock()
        .await
        .handle(InputEvent::DownloadClicked)
        .map_err(|e| {
            let error = ApiError::from(e);
            (status_for(error.code), Json(error))
        })?;

    let file = events
        .into_iter()
        .find_map(|event| match event {
            ServerEvent::DownloadReady { file } => Some(file),
            _ => None,
        })
        .ok_or_else(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(
                    ErrorCode::Internal,
                    "download produced no payload",
                )),
            )
        })?;

    Ok(csv_response(file))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidParameter => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidState => StatusCode::CONFLICT,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn csv_response(file: FilePayload) -> (StatusCode, HeaderMap, String) {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&file.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("text/csv")),
    );
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    (StatusCode::OK, headers, file.content)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

/// The dashboard's event channel. One session per connection, processing one
/// request at a time; a rejected request is answered with an error event
/// rather than dropping the connection.
async fn ws_connection(state: Arc<AppState>, socket: WebSocket) {
    let session_id = Uuid::new_v4();
    let session = Arc::new(Mutex::new(Session::new(state.dataset.clone())));
    state
        .sessions
        .write()
        .await
        .insert(session_id, session.clone());
    info!(%session_id, "session opened");

    let (mut sender, mut receiver) = socket.split();

    if send_event(&mut sender, &ServerEvent::SessionReady { session_id })
        .await
        .is_err()
    {
        state.sessions.write().await.remove(&session_id);
        return;
    }

    'outer: while let Some(Ok(message)) = receiver.next().await {
        let Message::Text(text) = message else {
            continue;
        };

        let events = match serde_json::from_str::<ClientRequest>(&text) {
            Ok(request) => dispatch(&session, request).await,
            Err(err) => {
                warn!(%session_id, %err, "unparseable client request");
                vec![ServerEvent::Error(ApiError::new(
                    ErrorCode::InvalidParameter,
                    "unparseable request",
                ))]
            }
        };

        for event in &events {
            if send_event(&mut sender, event).await.is_err() {
                break 'outer;
            }
        }
    }

    state.sessions.write().await.remove(&session_id);
    info!(%session_id, "session closed");
}

async fn dispatch(session: &Arc<Mutex<Session>>, request: ClientRequest) -> Vec<ServerEvent> {
    let event = match request {
        ClientRequest::SetSampleLevel { level } => InputEvent::SliderChanged { level },
        ClientRequest::SetColor { color } => InputEvent::ColorChanged { color },
    };
    match session.lock().await.handle(event) {
        Ok(events) => events,
        Err(err) => vec![ServerEvent::Error(err.into())],
    }
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(event) {
        Ok(v) => v,
        Err(_) => return Ok(()),
    };
    sender.send(Message::Text(text)).await
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
