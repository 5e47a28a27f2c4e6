mod auth;
mod dto;
mod errors;
mod feed;
mod models;
mod routes;
mod states;
mod storage;

use std::time::Duration;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use tower::{BoxError, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::routes::{
    category::{delete_category, list_categories, upsert_category},
    feed::get_feed,
    health::health_check,
    media::{serve_media, upload_media},
    post::{create_post, delete_post, edit_post, toggle_favorite, toggle_like},
    user::{get_current_user, login, signup},
};
use crate::states::AppState;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    // JWT Secret
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set!");

    // Create application state
    let state = AppState::new(jwt_secret);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        // Public routes (no auth required)
        .route("/health", get(health_check))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/feed", get(get_feed))
        .route("/media/{id}", get(serve_media))
        // Protected routes (auth required)
        .route("/users/me", get(get_current_user))
        .route("/posts", post(create_post))
        .route("/posts/{id}", put(edit_post).delete(delete_post))
        .route("/posts/{id}/like", post(toggle_like))
        .route("/posts/{id}/favorite", post(toggle_favorite))
        .route("/categories", get(list_categories).post(upsert_category))
        .route("/categories/{id}", delete(delete_category))
        .route("/media", post(upload_media))
        // Add state and middleware
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|_: BoxError| async {
                    StatusCode::REQUEST_TIMEOUT
                }))
                .concurrency_limit(1024)
                .timeout(Duration::from_secs(30)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    info!("Server running on http://{}", addr);
    info!("API Endpoints:");
    info!("  GET    /health               - Health check");
    info!("  POST   /auth/signup          - Create account");
    info!("  POST   /auth/login           - Login");
    info!("  GET    /users/me             - Get current user (auth)");
    info!("  GET    /feed                 - Browse feed/timeline (filters: category, year, view, group)");
    info!("  POST   /posts                - Create post (auth)");
    info!("  PUT    /posts/:id            - Edit post (auth)");
    info!("  DELETE /posts/:id            - Delete post (auth)");
    info!("  POST   /posts/:id/like       - Toggle like (auth)");
    info!("  POST   /posts/:id/favorite   - Toggle favorite (auth)");
    info!("  GET    /categories           - List categories");
    info!("  POST   /categories           - Upsert category by name (auth)");
    info!("  DELETE /categories/:id       - Delete category (auth)");
    info!("  POST   /media                - Upload media, returns handle (auth)");
    info!("  GET    /media/:id            - Serve media bytes");

    axum::serve(listener, app).await.unwrap();
}
