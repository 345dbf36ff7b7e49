//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance and the environment
//! variables `DATABASE_URL` and `JWT_SECRET`. Without them every test returns early.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Register a fresh user and return their access token
async fn signed_in(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let register = RegisterRequest::unique();
    let response = server.post("/auth/register", &register).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    (register, auth)
}

async fn create_article(server: &TestServer, token: &str, title: &str) -> ArticleResponse {
    let response = server
        .post_auth("/articles", token, &CreateArticleRequest::titled(title))
        .await
        .unwrap();
    let created: DataResponse<ArticleResponse> =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    created.data
}

async fn vote(
    server: &TestServer,
    token: &str,
    article: &str,
    quantity: i64,
) -> DataResponse<Option<LikeResponse>> {
    let body = VoteRequest {
        article: article.to_string(),
        quantity,
    };
    let response = server.post_auth("/likes", token, &body).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, auth) = signed_in(&server).await;

    assert_eq!(auth.user.email, register.email);
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());

    let response = server.get_auth("/users/@me", &auth.access_token).await.unwrap();
    let me: DataResponse<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.data.id, auth.user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login = LoginRequest {
        email: format!("nobody{}@example.com", unique_suffix()),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/auth/login", &login).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signed_in(&server).await;

    let response = server
        .patch_auth("/users/@me", &auth.access_token, &json!({ "phone": "555-0100" }))
        .await
        .unwrap();
    let updated: DataResponse<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.data.phone.as_deref(), Some("555-0100"));
    assert_eq!(updated.data.name, auth.user.name);

    let response = server
        .get_auth(&format!("/users/{}", auth.user.id), &auth.access_token)
        .await
        .unwrap();
    let fetched: DataResponse<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.data.phone.as_deref(), Some("555-0100"));
}

// ============================================================================
// Article Tests
// ============================================================================

#[tokio::test]
async fn test_article_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signed_in(&server).await;
    let token = &auth.access_token;

    let article = create_article(&server, token, "Lifecycle").await;
    assert_eq!(article.author, auth.user.id);

    let response = server
        .put_auth(
            &format!("/articles/{}", article.id),
            token,
            &json!({ "title": "Lifecycle, revised" }),
        )
        .await
        .unwrap();
    let updated: DataResponse<ArticleResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.message, "Article updated successfully");
    assert_eq!(updated.data.title, "Lifecycle, revised");
    assert_eq!(updated.data.content, "Lifecycle body");

    let response = server
        .get_auth(&format!("/articles/{}", article.id), token)
        .await
        .unwrap();
    let found: DataResponse<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.data["author"]["email"], auth.user.email);

    let response = server
        .delete_auth(&format!("/articles/{}", article.id), token)
        .await
        .unwrap();
    let deleted: DataResponse<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(deleted.data.is_null());

    let response = server
        .get_auth(&format!("/articles/{}", article.id), token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_only_the_author_can_change_an_article() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signed_in(&server).await;
    let (_, stranger) = signed_in(&server).await;

    let article = create_article(&server, &owner.access_token, "Guarded").await;

    let response = server
        .put_auth(
            &format!("/articles/{}", article.id),
            &stranger.access_token,
            &json!({ "title": "Hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .delete_auth(&format!("/articles/{}", article.id), &stranger.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_list_own_articles_with_paging_and_projection() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signed_in(&server).await;
    let token = &auth.access_token;

    for n in 0..5 {
        create_article(&server, token, &format!("Paged {n}")).await;
    }

    let response = server
        .get_auth("/articles/mine?current=2&pageSize=2&sort=title&fields=title", token)
        .await
        .unwrap();
    let list: ListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(
        list.meta,
        PageMeta {
            current: 2,
            page_size: 2,
            pages: 3,
            total: 5
        }
    );
    let titles: Vec<&str> = list
        .result
        .iter()
        .filter_map(|doc| doc["title"].as_str())
        .collect();
    assert_eq!(titles, ["Paged 2", "Paged 3"]);
    assert!(list.result.iter().all(|doc| doc.get("content").is_none()));
}

#[tokio::test]
async fn test_list_ignores_reserved_and_malformed_keys() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signed_in(&server).await;
    let token = &auth.access_token;

    let title = format!("Needle {}", unique_suffix());
    create_article(&server, token, &title).await;

    let path = format!(
        "/articles?title={}&limit=0&skip=9&createdSince=notadate&pageSize=abc",
        title.replace(' ', "%20")
    );
    let response = server.get_auth(&path, token).await.unwrap();
    let list: ListResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(list.meta.total, 1);
    assert_eq!(list.meta.page_size, 10);
    assert_eq!(list.result[0]["title"], title.as_str());
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_vote_toggle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signed_in(&server).await;
    let token = &auth.access_token;
    let article = create_article(&server, token, "Votable").await;

    let created = vote(&server, token, &article.id, 1).await;
    assert_eq!(created.message, "Like created successfully");
    let like = created.data.unwrap();
    assert_eq!(like.quantity, 1);
    assert_eq!(like.user, auth.user.id);

    let flipped = vote(&server, token, &article.id, -1).await;
    assert_eq!(flipped.message, "Like updated successfully");
    let flipped_like = flipped.data.unwrap();
    assert_eq!(flipped_like.id, like.id);
    assert_eq!(flipped_like.quantity, -1);

    let response = server
        .get_auth(&format!("/likes/{}", article.id), token)
        .await
        .unwrap();
    let found: DataResponse<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.message, "Like found");
    assert_eq!(found.data["article"]["title"], "Votable");

    let retracted = vote(&server, token, &article.id, -1).await;
    assert_eq!(retracted.message, "Like removed successfully");
    assert!(retracted.data.is_none());

    let response = server
        .get_auth(&format!("/likes/{}", article.id), token)
        .await
        .unwrap();
    let found: DataResponse<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(found.data.is_null());
}

#[tokio::test]
async fn test_vote_rejects_bad_input() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = signed_in(&server).await;
    let token = &auth.access_token;
    let article = create_article(&server, token, "Strict").await;

    let body = VoteRequest {
        article: article.id.clone(),
        quantity: 0,
    };
    let response = server.post_auth("/likes", token, &body).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_QUANTITY");

    let body = VoteRequest {
        article: "00000000-0000-0000-0000-000000000000".to_string(),
        quantity: 1,
    };
    let response = server.post_auth("/likes", token, &body).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_ARTICLE");
}

#[tokio::test]
async fn test_likes_are_scoped_to_their_owner() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = signed_in(&server).await;
    let (_, bob) = signed_in(&server).await;
    let article = create_article(&server, &alice.access_token, "Shared").await;

    let like = vote(&server, &alice.access_token, &article.id, 1)
        .await
        .data
        .unwrap();
    vote(&server, &bob.access_token, &article.id, -1).await;

    let response = server.get_auth("/likes", &bob.access_token).await.unwrap();
    let list: ListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.meta.total, 1);
    assert_eq!(list.result[0]["quantity"], -1);

    let response = server
        .patch_auth(
            &format!("/likes/{}", like.id),
            &bob.access_token,
            &json!({ "quantity": -1 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/likes/{}", like.id),
            &alice.access_token,
            &json!({ "quantity": -1 }),
        )
        .await
        .unwrap();
    let updated: DataResponse<LikeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.data.quantity, -1);

    let response = server
        .delete_auth(&format!("/likes/{}", like.id), &alice.access_token)
        .await
        .unwrap();
    let removed: DataResponse<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(removed.message, "Like removed successfully");
    assert!(removed.data.is_null());
}

#[tokio::test]
async fn test_protected_routes_require_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    for path in ["/users", "/articles", "/likes"] {
        let response = server.get(path).await.unwrap();
        assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    }
}
