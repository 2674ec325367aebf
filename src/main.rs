use axum::routing::{get, post, put};
use axum::Router;
use tracing_subscriber::EnvFilter;

use skill_registry::api;
use skill_registry::config::Config;
use skill_registry::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.base_url);

    let state = AppState::new(config.clone())?;
    tracing::info!(
        "Catalog loaded: {} skills, {} log entries",
        state.catalog.skills.len(),
        state.catalog.logs.len()
    );

    let app = Router::new()
        .route("/api/skills", get(api::skills::list_skills))
        .route("/api/skills/{id}", get(api::skills::get_skill))
        .route("/api/skills/{id}/blog", post(api::content::generate_blog))
        .route("/api/search", post(api::search::search))
        .route("/api/logs", get(api::skills::list_logs))
        .route("/api/audit", post(api::content::audit_code))
        .route("/api/media/image", post(api::media::generate_image))
        .route("/api/media/edit", post(api::media::edit_image))
        .route("/api/media/video", post(api::media::generate_video))
        .route("/api/config", get(api::skills::get_config))
        .route("/api/config", put(api::skills::update_config))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
