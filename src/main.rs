mod analytics;
mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod services;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{config::Config, services::RedisService};

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");
    let config_state = config.clone();

    // Initialize Redis client
    let redis_client =
        Arc::new(redis::Client::open(config.redis.url).expect("Failed to connect to Redis"));

    // Initialize RedisService
    let redis_service = RedisService::new(redis_client.clone());

    // Session store setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.session.secure)
        .with_same_site(SameSite::Lax)
        .with_name(config.session.cookie_name);

    // Create router with all routes
    let app = Router::new()
        // Auth routes
        .route("/", get(handlers::serve_landing_page))
        .route(
            "/login",
            get(handlers::serve_login_page).post(handlers::handle_login),
        )
        .route(
            "/register",
            get(handlers::serve_register_page).post(handlers::handle_register),
        )
        .route("/logout", get(handlers::handle_logout))
        // Dashboard
        .route("/dashboard", get(handlers::serve_dashboard))
        // Subscription routes
        .route(
            "/add",
            get(handlers::serve_add_page).post(handlers::handle_add),
        )
        .route(
            "/edit/:subscription_id",
            get(handlers::serve_edit_page).post(handlers::handle_edit),
        )
        .route("/delete/:subscription_id", post(handlers::handle_delete))
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // Add middleware
        .layer(from_fn(middleware::require_auth))
        .layer(session_layer)
        // Add state
        .with_state((redis_service, config_state));

    println!("Server running");
    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        config.server.host, config.server.port
    ))
    .await
    .expect("Failed to bind server");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Failed to start server");
}
