//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use grimoire_domain::{
    CastingMode, Character, CharacterId, CharacterSpells, ClassFeature, CostFilter, Spell,
};

use crate::app::App;
use crate::use_cases::spellcasting::{SpellPanel, SpellcastingError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/spells", get(search_spells))
        .route("/api/classes/{class_id}/features", get(class_features))
        .route("/api/characters", get(list_characters).post(create_character))
        .route(
            "/api/characters/{id}",
            get(get_character).delete(delete_character),
        )
        .route("/api/characters/{id}/spells", put(update_spells))
        .route("/api/characters/{id}/spell-panel", get(spell_panel))
        .route("/api/characters/{id}/cast", post(cast_spell))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Content
// =============================================================================

#[derive(Debug, Deserialize)]
struct SpellSearchParams {
    #[serde(default)]
    query: String,
    cost: Option<String>,
}

async fn search_spells(
    State(app): State<Arc<App>>,
    Query(params): Query<SpellSearchParams>,
) -> Result<Json<Vec<Spell>>, ApiError> {
    let cost: CostFilter = match params.cost.as_deref() {
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid cost filter: {raw}")))?,
        None => CostFilter::All,
    };
    let spells = app
        .use_cases
        .content
        .search_spells(&params.query, cost)
        .await?;
    Ok(Json(spells))
}

async fn class_features(
    State(app): State<Arc<App>>,
    Path(class_id): Path<String>,
) -> Result<Json<BTreeMap<u8, Vec<ClassFeature>>>, ApiError> {
    let features = app.use_cases.content.class_features(&class_id).await?;
    Ok(Json(features))
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCharacterRequest {
    name: String,
}

async fn list_characters(State(app): State<Arc<App>>) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = app
        .use_cases
        .spellcasting
        .list_characters()
        .await?;
    Ok(Json(characters))
}

async fn create_character(
    State(app): State<Arc<App>>,
    Json(req): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<Character>), ApiError> {
    let character = app
        .use_cases
        .spellcasting
        .create_character(&req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(character)))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Character>, ApiError> {
    let id = parse_character_id(&id)?;
    let character = app.use_cases.spellcasting.get_character(id).await?;
    Ok(Json(character))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_character_id(&id)?;
    app.use_cases.spellcasting.delete_character(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_spells(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Json(spells): Json<CharacterSpells>,
) -> Result<Json<Character>, ApiError> {
    let id = parse_character_id(&id)?;
    let character = app.use_cases.spellcasting.update_spells(id, spells).await?;
    Ok(Json(character))
}

async fn spell_panel(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<SpellPanel>, ApiError> {
    let id = parse_character_id(&id)?;
    let panel = app.use_cases.spellcasting.spell_panel(id).await?;
    Ok(Json(panel))
}

// =============================================================================
// Casting
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CastRequest {
    spell_id: String,
    #[serde(flatten)]
    mode: CastingMode,
    /// true expends the resource (cast), false restores it (un-cast)
    #[serde(default = "default_expend")]
    expend: bool,
}

fn default_expend() -> bool {
    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CastResponse {
    character: Character,
    changed: bool,
}

async fn cast_spell(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Json(req): Json<CastRequest>,
) -> Result<Json<CastResponse>, ApiError> {
    let id = parse_character_id(&id)?;
    let result = app
        .use_cases
        .spellcasting
        .cast_spell(id, &req.spell_id, &req.mode, req.expend)
        .await?;
    Ok(Json(CastResponse {
        character: result.character,
        changed: result.changed,
    }))
}

// =============================================================================
// Errors
// =============================================================================

fn parse_character_id(raw: &str) -> Result<CharacterId, ApiError> {
    let uuid = Uuid::parse_str(raw)
        .map_err(|_| ApiError::BadRequest("Invalid character ID".to_string()))?;
    Ok(CharacterId::from_uuid(uuid))
}

pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<SpellcastingError> for ApiError {
    fn from(e: SpellcastingError) -> Self {
        match e {
            SpellcastingError::CharacterNotFound(_) | SpellcastingError::SpellNotFound(_) => {
                ApiError::NotFound
            }
            SpellcastingError::Domain(err) => ApiError::BadRequest(err.to_string()),
            SpellcastingError::Repo(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(e: crate::infrastructure::ports::RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
