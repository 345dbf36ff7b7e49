//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    pub avatar: Option<String>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

// ============================================================================
// Article Requests
// ============================================================================

/// Create article request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    pub thumbnail: Option<String>,
}

/// Update article request; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    pub content: Option<String>,

    pub thumbnail: Option<String>,
}

// ============================================================================
// Like Requests
// ============================================================================

/// Vote on an article. `quantity` is checked against ±1 by the toggle engine.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VoteRequest {
    #[validate(length(min = 1, message = "Article id is required"))]
    pub article: String,

    pub quantity: i64,
}

/// Set the polarity of an existing like
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLikeRequest {
    pub quantity: i64,
}
