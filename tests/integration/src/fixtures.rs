//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per process run and per call, so reruns against one database never collide
pub fn unique_suffix() -> String {
    format!(
        "{}{}",
        Utc::now().timestamp_micros(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Tester {suffix}"),
            email: format!("tester{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub thumbnail: Option<String>,
}

impl CreateArticleRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            content: format!("{title} body"),
            title,
            thumbnail: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoteRequest {
    pub article: String,
    pub quantity: i64,
}

/// `{ message, data }`
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct LikeResponse {
    pub id: String,
    pub user: String,
    pub article: String,
    pub quantity: i16,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current: u64,
    pub page_size: u64,
    pub pages: u64,
    pub total: u64,
}

/// `{ meta, result }`; list items stay untyped because projection reshapes them
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub meta: PageMeta,
    pub result: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
