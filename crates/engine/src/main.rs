//! Grimoire Engine - Main entry point.

use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod infrastructure;
mod use_cases;

use app::App;
use infrastructure::content::JsonContent;
use infrastructure::memory::InMemoryCharacterRepo;
use infrastructure::ports::{CharacterRepo, FeatureRepo, SpellRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grimoire_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Grimoire Engine");

    // Load configuration
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);
    let content_dir =
        PathBuf::from(std::env::var("CONTENT_DIR").unwrap_or_else(|_| "content".into()));

    // Load content
    let content = Arc::new(JsonContent::load(&content_dir)?);
    let spell_repo: Arc<dyn SpellRepo> = content.clone();
    let feature_repo: Arc<dyn FeatureRepo> = content;

    // Character storage
    let character_repo: Arc<dyn CharacterRepo> = Arc::new(InMemoryCharacterRepo::new());

    // Create application
    let app = Arc::new(App::new(character_repo, spell_repo, feature_repo));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = api::http::routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app);

    let addr = format!("{server_host}:{server_port}");
    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
