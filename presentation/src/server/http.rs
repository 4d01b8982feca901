//! HTTP transport
//!
//! `POST /run-debate` answers with the finished result as JSON. The two
//! `-stream` routes answer with Server-Sent Events, one frame per
//! [`SessionEvent`], where the frame name is the event kind and the data is
//! its JSON payload.
//!
//! Each session owns a [`CancellationToken`]. Dropping the response (client
//! disconnect) cancels it, and so does either timeout.

use crate::output::errors::user_message;
use arena_application::{
    ChannelEventSink, NoEvents, RunDebateInput, RunDiscussionInput, SessionError, SessionRunner,
};
use arena_domain::{Participant, SessionEvent, SessionResult, Topic};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::post,
};
use futures::Stream;
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{info, warn};

/// Limits applied to every session started over HTTP
#[derive(Debug, Clone, Copy)]
pub struct ServerTimeouts {
    /// Whole-session limit
    pub session: Duration,
    /// Longest silence between two events of a streamed session
    pub chunk: Duration,
}

impl Default for ServerTimeouts {
    fn default() -> Self {
        Self {
            session: Duration::from_secs(900),
            chunk: Duration::from_secs(120),
        }
    }
}

/// Application state shared across handlers
pub struct AppState {
    pub runner: SessionRunner,
    /// Rounds used when a debate request omits them
    pub default_rounds: usize,
    pub timeouts: ServerTimeouts,
}

type SharedState = Arc<AppState>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/run-debate", post(run_debate))
        .route("/run-debate-stream", post(run_debate_stream))
        .route("/run-discussion-stream", post(run_discussion_stream))
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until the process exits
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

// ==================== Requests ====================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateRequest {
    pub topic: Option<String>,
    pub affirmative_model: Option<String>,
    pub negative_model: Option<String>,
    pub rounds: Option<usize>,
}

impl DebateRequest {
    pub fn into_input(self, default_rounds: usize) -> Result<RunDebateInput, ApiError> {
        let (Some(topic), Some(affirmative), Some(negative)) =
            (self.topic, self.affirmative_model, self.negative_model)
        else {
            return Err(ApiError::bad_request("Missing required fields"));
        };
        let topic =
            Topic::new(topic).map_err(|_| ApiError::bad_request("Missing required fields"))?;
        Ok(
            RunDebateInput::new(topic, participant(&affirmative)?, participant(&negative)?)
                .with_rounds(self.rounds.unwrap_or(default_rounds)),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscussionRequest {
    pub topic: Option<String>,
}

impl DiscussionRequest {
    pub fn into_input(self) -> Result<RunDiscussionInput, ApiError> {
        self.topic
            .and_then(|t| Topic::new(t).ok())
            .map(RunDiscussionInput::new)
            .ok_or_else(|| ApiError::bad_request("Missing topic"))
    }
}

fn participant(key: &str) -> Result<Participant, ApiError> {
    key.parse()
        .map_err(|_| ApiError::bad_request(format!("Unknown model: {}", key)))
}

// ==================== Errors ====================

/// `{"error": message}` with a status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn from_session(error: &SessionError) -> Self {
        let status = match error {
            SessionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: user_message(error),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// ==================== Handlers ====================

async fn run_debate(
    State(state): State<SharedState>,
    body: Result<Json<DebateRequest>, JsonRejection>,
) -> Result<Json<SessionResult>, ApiError> {
    let Json(request) = body?;
    let input = request.into_input(state.default_rounds)?;
    info!("HTTP debate: {} vs {}", input.affirmative, input.negative);

    let token = CancellationToken::new();
    // Handler future dropped on disconnect
    let _guard = token.clone().drop_guard();

    match tokio::time::timeout(
        state.timeouts.session,
        state.runner.run_debate(input, &NoEvents, &token),
    )
    .await
    {
        Ok(Ok(result)) => Ok(Json(result)),
        Ok(Err(e)) => Err(ApiError::from_session(&e)),
        Err(_) => {
            token.cancel();
            warn!("Debate timed out after {:?}", state.timeouts.session);
            Err(ApiError {
                status: StatusCode::GATEWAY_TIMEOUT,
                message: timeout_message(state.timeouts.session),
            })
        }
    }
}

async fn run_debate_stream(
    State(state): State<SharedState>,
    body: Result<Json<DebateRequest>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let Json(request) = body?;
    let input = request.into_input(state.default_rounds)?;
    Ok(stream_session(&state, SessionRequest::Debate(input)))
}

async fn run_discussion_stream(
    State(state): State<SharedState>,
    body: Result<Json<DiscussionRequest>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::bad_request("Missing topic"))?;
    let input = request.into_input()?;
    Ok(stream_session(&state, SessionRequest::Discussion(input)))
}

// ==================== Streaming ====================

enum SessionRequest {
    Debate(RunDebateInput),
    Discussion(RunDiscussionInput),
}

fn stream_session(
    state: &AppState,
    request: SessionRequest,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + use<>> {
    let (sink, events) = ChannelEventSink::channel();
    let token = CancellationToken::new();

    let runner = state.runner.clone();
    let task_token = token.clone();
    tokio::spawn(async move {
        // Outcome already reported through the sink
        let _ = match request {
            SessionRequest::Debate(input) => runner.run_debate(input, &sink, &task_token).await,
            SessionRequest::Discussion(input) => {
                runner.run_discussion(input, &sink, &task_token).await
            }
        };
    });

    let watch = EventWatch::new(events, token, state.timeouts);
    let stream = futures::stream::unfold(watch, |mut watch| async move {
        let event = watch.next().await?;
        Some((Ok(sse_frame(&event)), watch))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// SSE frame for a session event
pub fn sse_frame(event: &SessionEvent) -> Event {
    Event::default()
        .event(event.kind())
        .data(event.payload().to_string())
}

fn timeout_message(limit: Duration) -> String {
    format!("Session timed out after {}s", limit.as_secs())
}

/// Reads session events on behalf of one SSE response
///
/// Ends after the first terminal event. Owns the drop guard, so dropping
/// the response stream cancels the session.
struct EventWatch {
    events: mpsc::UnboundedReceiver<SessionEvent>,
    token: CancellationToken,
    _guard: DropGuard,
    deadline: Instant,
    session_timeout: Duration,
    chunk_timeout: Duration,
    finished: bool,
}

impl EventWatch {
    fn new(
        events: mpsc::UnboundedReceiver<SessionEvent>,
        token: CancellationToken,
        timeouts: ServerTimeouts,
    ) -> Self {
        Self {
            events,
            _guard: token.clone().drop_guard(),
            token,
            deadline: Instant::now() + timeouts.session,
            session_timeout: timeouts.session,
            chunk_timeout: timeouts.chunk,
            finished: false,
        }
    }

    async fn next(&mut self) -> Option<SessionEvent> {
        if self.finished {
            return None;
        }
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        let limit = self.chunk_timeout.min(remaining);

        match tokio::time::timeout(limit, self.events.recv()).await {
            Ok(Some(event)) => {
                self.finished = event.is_terminal();
                Some(event)
            }
            // Runner ended without a terminal event (cancelled)
            Ok(None) => None,
            Err(_) => {
                self.token.cancel();
                self.finished = true;
                let message = if Instant::now() >= self.deadline {
                    timeout_message(self.session_timeout)
                } else {
                    format!("No output for {}s", self.chunk_timeout.as_secs())
                };
                warn!("Streaming session stopped: {}", message);
                Some(SessionEvent::error(message))
            }
        }
    }
}
