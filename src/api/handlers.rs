//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    settings::{is_valid_color, FontSize, SettingsRecord},
    state::{AppState, DisplaySnapshot},
    validation::ValidationResult,
};
use super::responses::{
    CommandResponse, ElapsedResponse, ErrorResponse, HealthResponse, ManualTimeRequest,
    SettingValue, StatusResponse, ValidateRequest,
};

type ApiResult<T> = Result<Json<T>, Response>;

/// Turn an application error into an HTTP response
fn app_error(state: &AppState, e: AppError) -> Response {
    match e {
        AppError::Validation(e) => {
            info!("Manual time rejected: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResult::invalid_commit(&e)),
            )
                .into_response()
        }
        AppError::Settings(e) => {
            error!("Settings not persisted: {}", e);
            let mut body = ErrorResponse::new(e.to_string());
            if let Ok(settings) = state.get_settings() {
                body = body.with_settings(settings);
            }
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
        AppError::LockPoisoned(_) => {
            error!("{}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

fn bad_request(message: String) -> Response {
    warn!("Rejected settings value: {}", message);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

/// Handle POST /start - Start or resume the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult<CommandResponse> {
    state.start()
        .map(|outcome| Json(outcome.into()))
        .map_err(|e| app_error(&state, e))
}

/// Handle POST /pause - Pause a running timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult<CommandResponse> {
    state.pause()
        .map(|outcome| Json(outcome.into()))
        .map_err(|e| app_error(&state, e))
}

/// Handle POST /reset - Stop and zero the timer
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult<CommandResponse> {
    state.reset()
        .map(|outcome| Json(outcome.into()))
        .map_err(|e| app_error(&state, e))
}

/// Handle POST /manual-time - Commit a manual starting time
pub async fn manual_time_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ManualTimeRequest>,
) -> ApiResult<CommandResponse> {
    state.set_manual_time(&request.hours, &request.minutes, &request.seconds)
        .map(|outcome| Json(outcome.into()))
        .map_err(|e| app_error(&state, e))
}

/// Handle POST /validate - Per-keystroke validation of one field
pub async fn validate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ValidateRequest>,
) -> ApiResult<ValidationResult> {
    state.validate_field(request.field, &request.text)
        .map(Json)
        .map_err(|e| app_error(&state, e))
}

/// Handle GET /elapsed - Poll the engine directly
pub async fn elapsed_handler(State(state): State<Arc<AppState>>) -> ApiResult<ElapsedResponse> {
    state.timer_snapshot()
        .map(|snapshot| Json(ElapsedResponse {
            elapsed: snapshot.elapsed,
            seconds: snapshot.elapsed_seconds,
        }))
        .map_err(|e| app_error(&state, e))
}

/// Handle GET /display - Latest value rendered by the display ticker
pub async fn display_handler(State(state): State<Arc<AppState>>) -> Json<DisplaySnapshot> {
    Json(state.get_display())
}

/// Handle GET /status - Return current timer, validation and settings status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let timer = state.timer_snapshot().map_err(|e| app_error(&state, e))?;
    let errored_fields = state.errored_fields().map_err(|e| app_error(&state, e))?;
    let settings = state.get_settings().map_err(|e| app_error(&state, e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        phase: timer.phase,
        elapsed: timer.elapsed,
        elapsed_seconds: timer.elapsed_seconds,
        accumulated_seconds: timer.accumulated_seconds,
        base_offset_seconds: timer.base_offset_seconds,
        errored_fields,
        settings,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /settings - Current appearance settings
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> ApiResult<SettingsRecord> {
    state.get_settings()
        .map(Json)
        .map_err(|e| app_error(&state, e))
}

/// Handle PUT /settings/font
pub async fn font_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettingValue<String>>,
) -> ApiResult<SettingsRecord> {
    let font = request.value.trim().to_string();
    if font.is_empty() {
        return Err(bad_request("font name must not be empty".to_string()));
    }
    state.set_font(font)
        .map(Json)
        .map_err(|e| app_error(&state, e))
}

/// Handle PUT /settings/font-size
pub async fn font_size_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettingValue<u32>>,
) -> ApiResult<SettingsRecord> {
    let size = FontSize::try_from(request.value).map_err(|e| bad_request(e.to_string()))?;
    state.set_font_size(size)
        .map(Json)
        .map_err(|e| app_error(&state, e))
}

/// Handle PUT /settings/text-color
pub async fn text_color_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettingValue<String>>,
) -> ApiResult<SettingsRecord> {
    let color = checked_color(request.value)?;
    state.set_text_color(color)
        .map(Json)
        .map_err(|e| app_error(&state, e))
}

/// Handle PUT /settings/bg-color
pub async fn bg_color_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettingValue<String>>,
) -> ApiResult<SettingsRecord> {
    let color = checked_color(request.value)?;
    state.set_background_color(color)
        .map(Json)
        .map_err(|e| app_error(&state, e))
}

fn checked_color(value: String) -> Result<String, Response> {
    let value = value.trim().to_string();
    if is_valid_color(&value) {
        Ok(value)
    } else {
        Err(bad_request(format!(
            "'{}' is not a color name or #RRGGBB value",
            value
        )))
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
