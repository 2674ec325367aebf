use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::models::{AuditReport, AuditRequest, BlogPost};
use crate::state::AppState;

const MAX_AUDIT_SNIPPET_LEN: usize = 20_000;

/// POST /api/skills/:id/blog - Generate a marketing article for a skill.
/// Provider failures surface as 502; unlike discovery there is no local
/// fallback that could stand in for generated prose.
pub async fn generate_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, (StatusCode, String)> {
    let skill = state
        .catalog
        .skill_by_id(&id)
        .cloned()
        .ok_or((StatusCode::NOT_FOUND, "Skill not found".to_string()))?;

    let _permit = acquire_generation_permit(&state).await?;

    let llm_config = state.llm_config.read().clone();
    let post = crate::llm::blog::generate_blog_post(&state.http_client, &llm_config, &skill)
        .await
        .map_err(|e| {
            tracing::error!("Blog generation failed for {id}: {e:#}");
            (
                StatusCode::BAD_GATEWAY,
                format!("Blog generation failed: {e:#}"),
            )
        })?;

    Ok(Json(post))
}

/// POST /api/audit - Sentinel security audit of a code snippet
pub async fn audit_code(
    State(state): State<AppState>,
    Json(req): Json<AuditRequest>,
) -> Result<Json<AuditReport>, (StatusCode, String)> {
    let code = req.code.trim();
    if code.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Code is required".to_string()));
    }
    let code = truncate_to_char_boundary(code, MAX_AUDIT_SNIPPET_LEN);

    let _permit = acquire_generation_permit(&state).await?;

    let llm_config = state.llm_config.read().clone();
    let report = crate::llm::audit::audit_snippet(&state.http_client, &llm_config, &code)
        .await
        .map_err(|e| {
            tracing::error!("Code audit failed: {e:#}");
            (StatusCode::BAD_GATEWAY, format!("Audit failed: {e:#}"))
        })?;

    Ok(Json(report))
}

/// Acquire a slot on the shared generation semaphore.
pub(crate) async fn acquire_generation_permit(
    state: &AppState,
) -> Result<tokio::sync::OwnedSemaphorePermit, (StatusCode, String)> {
    state
        .generation_semaphore
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Generation service at capacity".to_string(),
            )
        })
}

fn truncate_to_char_boundary(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    s.char_indices()
        .take_while(|(i, _)| *i < max_len)
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_to_char_boundary("hello", 100), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "a".repeat(30_000);
        let result = truncate_to_char_boundary(&long, MAX_AUDIT_SNIPPET_LEN);
        assert_eq!(result.len(), MAX_AUDIT_SNIPPET_LEN);
    }

    #[test]
    fn test_truncate_unicode_safe() {
        // 4-byte emoji must not be split in the middle
        let s = "let x = \"🌍\";";
        let result = truncate_to_char_boundary(s, 10);
        assert!(result.is_char_boundary(result.len()));
    }
}
