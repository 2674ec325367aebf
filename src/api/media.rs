use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::content::acquire_generation_permit;
use crate::models::{EditRequest, ImageRequest, ImageResponse, VideoRequest, VideoResponse};
use crate::state::AppState;

/// POST /api/media/image - Generate an image from a prompt
pub async fn generate_image(
    State(state): State<AppState>,
    Json(req): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, (StatusCode, String)> {
    if req.prompt.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Prompt is required".to_string()));
    }

    let _permit = acquire_generation_permit(&state).await?;

    let llm_config = state.llm_config.read().clone();
    let data_url = crate::llm::media::generate_image(&state.http_client, &llm_config, &req)
        .await
        .map_err(|e| {
            tracing::error!("Image generation failed: {e:#}");
            (
                StatusCode::BAD_GATEWAY,
                format!("Image generation failed: {e:#}"),
            )
        })?;

    Ok(Json(ImageResponse { data_url }))
}

/// POST /api/media/edit - Edit an uploaded image according to a prompt
pub async fn edit_image(
    State(state): State<AppState>,
    Json(req): Json<EditRequest>,
) -> Result<Json<ImageResponse>, (StatusCode, String)> {
    if req.prompt.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Prompt is required".to_string()));
    }
    if req.image.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Image is required".to_string()));
    }

    let _permit = acquire_generation_permit(&state).await?;

    let llm_config = state.llm_config.read().clone();
    let data_url = crate::llm::media::edit_image(&state.http_client, &llm_config, &req)
        .await
        .map_err(|e| {
            tracing::error!("Image edit failed: {e:#}");
            (StatusCode::BAD_GATEWAY, format!("Image edit failed: {e:#}"))
        })?;

    Ok(Json(ImageResponse { data_url }))
}

/// POST /api/media/video - Generate a video; blocks while the provider's
/// long-running operation is polled, bounded by the configured attempt cap.
pub async fn generate_video(
    State(state): State<AppState>,
    Json(req): Json<VideoRequest>,
) -> Result<Json<VideoResponse>, (StatusCode, String)> {
    if req.prompt.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Prompt is required".to_string()));
    }

    let _permit = acquire_generation_permit(&state).await?;

    let llm_config = state.llm_config.read().clone();
    let uri = crate::llm::media::generate_video(
        &state.http_client,
        &llm_config,
        &req,
        Duration::from_secs(state.config.video_poll_interval_secs),
        state.config.video_poll_attempts,
    )
    .await
    .map_err(|e| {
        tracing::error!("Video generation failed: {e:#}");
        (
            StatusCode::BAD_GATEWAY,
            format!("Video generation failed: {e:#}"),
        )
    })?;

    Ok(Json(VideoResponse { uri }))
}
