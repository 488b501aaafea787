use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use alumni_api::middleware::{jwt_auth_middleware, require_member};
use alumni_api::state::AppState;
use alumni_api::{config, database};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Alumni API in {:?} mode", config.environment);

    let pool = database::connect(config)
        .unwrap_or_else(|e| panic!("failed to initialize database pool: {}", e));
    if let Err(e) = database::run_migrations(&pool).await {
        tracing::warn!("Migrations not applied (database unreachable?): {}", e);
    }

    let state = AppState::new(pool, config);
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Alumni API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    let config = config::config();

    // Everything under /api requires a verified token
    let protected = Router::new()
        .merge(user_routes())
        .merge(alumni_routes())
        .merge(employment_routes())
        .merge(file_routes())
        .layer(axum::middleware::from_fn(jwt_auth_middleware));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(protected)
        // Uploaded blobs are served directly from disk
        .nest_service("/uploads", ServeDir::new(&config.uploads.directory))
        // Global middleware
        .layer(DefaultBodyLimit::max(config.server.max_request_size_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use alumni_api::handlers::public::auth;
    use axum::routing::post;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn user_routes() -> Router<AppState> {
    use alumni_api::handlers::protected::users;

    Router::new().route("/api/users", get(users::list))
}

fn alumni_routes() -> Router<AppState> {
    use alumni_api::handlers::protected::alumni;

    Router::new()
        .route("/api/alumni", get(alumni::list).post(alumni::create))
        .route(
            "/api/alumni/:number",
            get(alumni::get).put(alumni::update).delete(alumni::delete),
        )
        .route_layer(axum::middleware::from_fn(require_member))
}

fn employment_routes() -> Router<AppState> {
    use alumni_api::handlers::protected::employment;
    use axum::routing::{delete, put};

    let records = Router::new()
        .route(
            "/api/employment",
            get(employment::list).post(employment::create),
        )
        .route("/api/employment/:id", get(employment::get))
        .route(
            "/api/employment/owner/:number",
            get(employment::list_by_owner).put(employment::update),
        )
        .route_layer(axum::middleware::from_fn(require_member));

    // Soft-delete workflow; per-record authorization happens in the service
    let trash = Router::new()
        .route("/api/employment/trash", get(employment::list_trash))
        .route("/api/employment/trash/:id", delete(employment::purge))
        .route(
            "/api/employment/owner/:number/trash",
            put(employment::mark_trash),
        )
        .route(
            "/api/employment/owner/:number/restore",
            put(employment::restore_trash),
        );

    records.merge(trash)
}

fn file_routes() -> Router<AppState> {
    use alumni_api::handlers::protected::files;
    use axum::routing::{delete, post};

    Router::new()
        .route("/api/files", get(files::list).post(files::upload))
        .route("/api/files/:id", get(files::get).delete(files::delete))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Alumni API",
            "version": version,
            "description": "REST backend for university alumni records and employment history",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/register, /auth/login (public - token acquisition)",
                "users": "/api/users (protected, admin)",
                "alumni": "/api/alumni[/:number] (protected)",
                "employment": "/api/employment[/:id] (protected)",
                "trash": "/api/employment/trash, /api/employment/owner/:number/{trash,restore} (protected)",
                "files": "/api/files[/:id] (protected), /uploads/* (public)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
