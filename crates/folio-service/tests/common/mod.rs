//! Shared fixtures for service tests: a context over the in-memory store

#![allow(dead_code)]

use std::sync::Arc;

use folio_common::auth::JwtService;
use folio_core::entities::Article;
use folio_core::value_objects::{Actor, RecordId};
use folio_db::MemoryStore;
use folio_service::dto::{CreateArticleRequest, RegisterRequest};
use folio_service::{ArticleService, AuthService, ServiceContext, ServiceContextBuilder};

pub const JWT_SECRET: &str = "service-test-secret";

pub fn context(store: &MemoryStore) -> ServiceContext {
    ServiceContextBuilder::new()
        .memory(store)
        .jwt_service(Arc::new(JwtService::new(JWT_SECRET, 3600)))
        .build()
        .unwrap()
}

/// Register a user and return the caller identity for it
pub async fn register(ctx: &ServiceContext, name: &str) -> Actor {
    let email = format!("{}@example.com", name.to_lowercase());
    let response = AuthService::new(ctx)
        .register(RegisterRequest {
            name: name.to_string(),
            email: email.clone(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    Actor::new(RecordId::parse(&response.data.id).unwrap(), email)
}

pub async fn write_article(ctx: &ServiceContext, author: &Actor, title: &str) -> RecordId {
    let response = ArticleService::new(ctx)
        .create(
            author,
            CreateArticleRequest {
                title: title.to_string(),
                content: format!("{title} body"),
                thumbnail: Some(format!("{title}.png")),
            },
        )
        .await
        .unwrap();
    RecordId::parse(&response.data.id).unwrap()
}

pub async fn load_article(ctx: &ServiceContext, id: RecordId) -> Option<Article> {
    ctx.article_repo().find_by_id(id).await.unwrap()
}
