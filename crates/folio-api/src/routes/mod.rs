//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{articles, auth, health, likes, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(article_routes())
        .merge(like_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/:id", get(users::get_user))
}

fn article_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            post(articles::create_article).get(articles::list_articles),
        )
        .route("/articles/mine", get(articles::list_my_articles))
        .route(
            "/articles/:id",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
}

fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/likes", post(likes::vote).get(likes::list_likes))
        // GET resolves the segment as an article id, PATCH and DELETE as a like id
        .route(
            "/likes/:id",
            get(likes::get_like_for_article)
                .patch(likes::update_like)
                .delete(likes::delete_like),
        )
}
