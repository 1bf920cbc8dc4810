use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use segments_api::middleware::auth::require_auth;
use segments_api::state::AppState;
use segments_api::{config, database, handlers};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!(
        "Starting Video Segments Player API in {:?} mode",
        config.environment
    );

    // One store client for the whole process, injected through router state
    let db = database::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize database client: {}", e));
    let state = AppState { db };

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Video Segments Player API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state.clone())
        // Resource routers
        .merge(auth_routes(state.clone()))
        .merge(project_routes(state.clone()))
        .merge(segment_routes(state))
        .fallback(not_found)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes(state: AppState) -> Router {
    use handlers::auth;

    let public = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Logout is a client-side token discard; no auth, no state change
        .route("/api/auth/logout", post(auth::logout))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/auth/refresh", post(auth::refresh))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    public.merge(protected)
}

fn project_routes(state: AppState) -> Router {
    use handlers::projects;

    // Every project route sits behind the auth gate
    Router::new()
        .route(
            "/api/projects/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/:project_id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn segment_routes(state: AppState) -> Router {
    use handlers::segments;

    // Segment routes are currently unauthenticated, unlike projects; pinned
    // by the integration tests until product decides otherwise
    Router::new()
        .route(
            "/api/segments/",
            get(segments::list_segments).post(segments::create_segment),
        )
        .route(
            "/api/segments/project/:project_id",
            get(segments::get_segments_by_project),
        )
        .route(
            "/api/segments/:segment_id",
            get(segments::get_segment)
                .put(segments::update_segment)
                .delete(segments::delete_segment),
        )
        .route(
            "/api/segments/:segment_id/views",
            post(segments::increment_views),
        )
        .route(
            "/api/segments/:segment_id/likes",
            post(segments::increment_likes),
        )
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Video Segments Player API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::ping(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "ok",
                "data": {
                    "status": "ok",
                    "timestamp": now.to_rfc3339(),
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now.to_rfc3339(),
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

async fn not_found(uri: axum::http::Uri) -> impl axum::response::IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Ruta no encontrada",
            "path": uri.to_string(),
        })),
    )
}
