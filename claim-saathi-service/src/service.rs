use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::{Next, from_fn},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use saathi_guidance::{ClaimForm, GuidanceAssistant, InterfaceLabels, Language};
use serde_json::{Value, json};
use std::{path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info};
use uuid::Uuid;

use crate::{
    config::Settings,
    models::{ChatRequest, ChatResponse, GuidanceResponse},
    workflow::build_assistant,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found_error(message: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<GuidanceAssistant>,
    /// Fixed file the speech renderer overwrites on every claim
    pub audio_path: PathBuf,
}

pub fn create_app(settings: &Settings) -> anyhow::Result<Router> {
    let assistant = build_assistant(settings)?;
    Ok(build_router(AppState {
        assistant: Arc::new(assistant),
        audio_path: settings.audio_output_path.clone(),
    }))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/interface/{language}", get(interface_labels))
        .route("/claims/guidance", post(claim_guidance))
        .route("/audio", get(latest_audio))
        .route("/chat", post(chat))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Middleware to add correlation ID to all requests
async fn correlation_id_middleware(mut request: Request<axum::body::Body>, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert("x-correlation-id", value);
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Bharat Insurance Claim Saathi",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "AI-powered multilingual insurance claim assistant for Indian policies",
        "endpoints": {
            "GET /interface/{language}": "Localized form labels and insurance types",
            "POST /claims/guidance": "Validate a claim and get step-by-step guidance",
            "GET /audio": "Voice version of the latest guidance",
            "POST /chat": "Ask the help assistant about Motor, Health or Crop insurance",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn parse_language(language: &str) -> Result<Language, ApiError> {
    language
        .parse::<Language>()
        .map_err(|e| bad_request_error(&e.to_string()))
}

async fn interface_labels(Path(language): Path<String>) -> ApiResult<InterfaceLabels> {
    let language = parse_language(&language)?;
    Ok(Json(InterfaceLabels::for_language(language)))
}

async fn claim_guidance(
    State(state): State<AppState>,
    Json(form): Json<ClaimForm>,
) -> Json<GuidanceResponse> {
    info!(
        language = ?form.language,
        insurance_type = ?form.insurance_type,
        "Received claim guidance request"
    );

    let outcome = state.assistant.process_claim(form).await;

    info!(status = ?outcome.status, has_audio = outcome.audio.is_some(), "Claim request completed");

    Json(GuidanceResponse {
        guidance: outcome.guidance,
        status: outcome.status,
        audio_url: outcome.audio.map(|_| "/audio".to_string()),
    })
}

async fn latest_audio(State(state): State<AppState>) -> Result<Response, ApiError> {
    match tokio::fs::read(&state.audio_path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(not_found_error("No voice guidance has been generated yet"))
        }
        Err(e) => {
            error!("Failed to read audio file {}: {}", state.audio_path.display(), e);
            Err(internal_error("Failed to read voice guidance", &e.to_string()))
        }
    }
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> ApiResult<ChatResponse> {
    let language = match request.language.as_deref() {
        Some(language) => parse_language(language)?,
        None => Language::English,
    };

    info!(
        language = %language,
        history_length = request.history.len(),
        "Received chat message"
    );

    let turn = state.assistant.chat_reply(&request.message, language).await;

    let mut history = request.history;
    history.push(turn);
    Ok(Json(ChatResponse { history }))
}
