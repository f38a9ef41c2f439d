// Axum API Server Module
//
// Purpose: REST API exposing the three demo endpoints (protocol lookup,
// aging clock, donor match) as JSON over HTTP.

#[cfg(feature = "api")]
use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::path::Path;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::aging::predict_age;

#[cfg(feature = "api")]
use crate::recipes::RecipeDb;

#[cfg(feature = "api")]
use crate::similarity::similarity_score;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<RecipeDb>,
    /// Caches donor-match scores; the O(n·m) scan is the only computation
    /// worth memoizing here.
    pub cache: Cache<String, serde_json::Value>,
}

#[cfg(feature = "api")]
impl AppState {
    /// Build the application state. `recipe_db_path` overrides the built-in
    /// protocol table with a JSON file of the same shape.
    pub fn new(recipe_db_path: Option<&str>) -> anyhow::Result<Self> {
        let recipes = match recipe_db_path {
            Some(path) => {
                tracing::info!("Loading recipe database from {}", path);
                RecipeDb::load(Path::new(path))?
            }
            None => {
                tracing::info!("Using built-in recipe database");
                RecipeDb::builtin()
            }
        };
        tracing::info!("Recipe database ready ({} protocols)", recipes.len());

        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(300))
            .build();

        Ok(Self {
            recipes: Arc::new(recipes),
            cache,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Demo endpoints (JSON API)
        .route("/get_recipe", post(get_recipe))
        .route("/predict_age", post(predict_age_route))
        .route("/check_match", post(check_match))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Protocol lookup. Misses return the sentinel list, never a 404: the
/// caller-facing contract is always a `recipe` array.
#[cfg(feature = "api")]
async fn get_recipe(
    State(state): State<AppState>,
    Json(req): Json<RecipeRequest>,
) -> impl IntoResponse {
    tracing::debug!("Recipe lookup for {:?}", req.cell_type);
    let recipe = state.recipes.lookup(&req.cell_type);

    Json(serde_json::json!({
        "recipe": recipe
    }))
}

/// Aging clock. Sums the features and dispatches on the fixed band table;
/// echoes the features back for the demo display.
#[cfg(feature = "api")]
async fn predict_age_route(Json(req): Json<AgeRequest>) -> impl IntoResponse {
    let prediction = predict_age(&req.features);
    tracing::debug!(
        "Age prediction over {} features: {}",
        req.features.len(),
        prediction.label
    );

    Json(serde_json::json!({
        "age_label": prediction.label,
        "age_value": prediction.age_value,
        "features_received": req.features
    }))
}

/// Donor match. Scores donor vs patient sequence by normalized longest
/// common substring; results are cached per sequence pair.
#[cfg(feature = "api")]
async fn check_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> impl IntoResponse {
    let cache_key = format!("match:{:?}:{:?}", req.donor_dna, req.patient_dna);

    // Check cache
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for donor match");
        return Json(cached);
    }

    let score = similarity_score(&req.donor_dna, &req.patient_dna);

    let result = serde_json::json!({
        "match_score": score
    });

    // Cache result
    state.cache.insert(cache_key, result.clone()).await;

    Json(result)
}

// ============================================================================
// Request Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct RecipeRequest {
    #[serde(default)]
    cell_type: String,
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct AgeRequest {
    #[serde(default)]
    features: Vec<f64>,
}

#[cfg(feature = "api")]
#[derive(serde::Deserialize, Debug)]
struct MatchRequest {
    #[serde(default = "default_sequence")]
    donor_dna: String,
    #[serde(default = "default_sequence")]
    patient_dna: String,
}

#[cfg(feature = "api")]
fn default_sequence() -> String {
    "ATCG".to_string()
}
