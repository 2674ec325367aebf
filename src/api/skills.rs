use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::models::{AgentLog, LlmConfigUpdate, Skill};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillsQuery {
    /// Optional case-insensitive category filter
    pub category: Option<String>,
}

/// GET /api/skills - List the catalog, optionally filtered by category.
/// Quarantined skills are included; hiding them is a presentation concern.
pub async fn list_skills(
    State(state): State<AppState>,
    Query(params): Query<SkillsQuery>,
) -> Json<Vec<Skill>> {
    let skills = match params.category {
        Some(ref category) => {
            let wanted = category.to_lowercase();
            state
                .catalog
                .skills
                .iter()
                .filter(|s| s.category.to_lowercase() == wanted)
                .cloned()
                .collect()
        }
        None => state.catalog.skills.clone(),
    };
    Json(skills)
}

/// GET /api/skills/:id - Fetch a single skill
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Skill>, (StatusCode, String)> {
    state
        .catalog
        .skill_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Skill not found".to_string()))
}

/// GET /api/logs - Cognition stream, newest entries first
pub async fn list_logs(State(state): State<AppState>) -> Json<Vec<AgentLog>> {
    let mut logs = state.catalog.logs.clone();
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Json(logs)
}

/// GET /api/config - Get current LLM config (API key redacted)
pub async fn get_config(State(state): State<AppState>) -> Json<LlmConfigResponse> {
    let config = state.llm_config.read();
    Json(LlmConfigResponse {
        provider: config.provider.clone(),
        base_url: config.base_url.clone(),
        rank_model: config.rank_model.clone(),
        content_model: config.content_model.clone(),
        image_model: config.image_model.clone(),
        edit_model: config.edit_model.clone(),
        video_model: config.video_model.clone(),
        has_api_key: config.api_key.is_some(),
    })
}

/// Config response with API key redacted
#[derive(serde::Serialize)]
pub struct LlmConfigResponse {
    pub provider: String,
    pub base_url: String,
    pub rank_model: String,
    pub content_model: String,
    pub image_model: String,
    pub edit_model: String,
    pub video_model: String,
    pub has_api_key: bool,
}

/// PUT /api/config - Update LLM config
pub async fn update_config(
    State(state): State<AppState>,
    Json(update): Json<LlmConfigUpdate>,
) -> Json<LlmConfigResponse> {
    {
        let mut config = state.llm_config.write();

        if let Some(provider) = update.provider {
            config.provider = provider;
        }
        // base_url is immutable at runtime (set via LLM_BASE_URL env var only)
        // to prevent SSRF: an attacker changing it could exfiltrate the API key
        if let Some(model) = update.rank_model {
            config.rank_model = model;
        }
        if let Some(model) = update.content_model {
            config.content_model = model;
        }
        if let Some(model) = update.image_model {
            config.image_model = model;
        }
        if let Some(model) = update.edit_model {
            config.edit_model = model;
        }
        if let Some(model) = update.video_model {
            config.video_model = model;
        }
        if let Some(api_key) = update.api_key {
            config.api_key = Some(api_key);
        }
    }

    get_config(State(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state() -> AppState {
        AppState::new(Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_category_filter_is_case_insensitive() {
        let Json(skills) = list_skills(
            State(state()),
            Query(SkillsQuery {
                category: Some("FINANCE".into()),
            }),
        )
        .await;
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name, "SEC Analyst Pro");
    }

    #[tokio::test]
    async fn test_no_filter_returns_all_including_quarantined() {
        let Json(skills) = list_skills(State(state()), Query(SkillsQuery { category: None })).await;
        assert!(skills
            .iter()
            .any(|s| s.status == crate::models::SkillStatus::Quarantined));
    }

    #[tokio::test]
    async fn test_unknown_skill_is_not_found() {
        let err = get_skill(State(state()), Path("s-999".into()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logs_are_newest_first() {
        let Json(logs) = list_logs(State(state())).await;
        assert!(logs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_config_response_redacts_api_key() {
        let st = state();
        st.llm_config.write().api_key = Some("sk-secret".into());

        let Json(resp) = get_config(State(st)).await;
        assert!(resp.has_api_key);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_update_config_applies_partial_update() {
        let st = state();
        let update = LlmConfigUpdate {
            provider: Some("openai".into()),
            rank_model: Some("gpt-4o-mini".into()),
            content_model: None,
            image_model: None,
            edit_model: None,
            video_model: None,
            api_key: None,
        };

        let Json(resp) = update_config(State(st.clone()), Json(update)).await;
        assert_eq!(resp.provider, "openai");
        assert_eq!(resp.rank_model, "gpt-4o-mini");
        // Untouched fields keep their defaults
        assert_eq!(resp.content_model, st.llm_config.read().content_model);
    }
}
