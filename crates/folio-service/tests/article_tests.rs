//! Article listing and ownership tests against the in-memory store

mod common;

use folio_core::error::DomainError;
use folio_core::query::{Filter, PageRequest, Predicate, Scalar};
use folio_core::traits::Collection;
use folio_db::MemoryStore;
use folio_service::dto::UpdateArticleRequest;
use folio_service::{ArticleService, ServiceError};

use common::{context, load_article, register, write_article};

#[tokio::test]
async fn test_pagination_arithmetic() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let author = register(&ctx, "Author").await;
    for i in 0..23 {
        write_article(&ctx, &author, &format!("Article {i}")).await;
    }
    let service = ArticleService::new(&ctx);

    let third = service.list("", PageRequest::new(3, 10)).await.unwrap();
    assert_eq!(third.meta.total, 23);
    assert_eq!(third.meta.pages, 3);
    assert_eq!(third.result.len(), 3);

    let beyond = service.list("", PageRequest::new(4, 10)).await.unwrap();
    assert!(beyond.result.is_empty());
    assert_eq!(beyond.meta.total, 23);
    assert_eq!(beyond.meta.current, 4);
}

#[tokio::test]
async fn test_page_size_falls_back_to_default() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let author = register(&ctx, "Author").await;
    for i in 0..12 {
        write_article(&ctx, &author, &format!("Article {i}")).await;
    }

    let page = ArticleService::new(&ctx)
        .list("", PageRequest::from_raw(Some("abc"), Some("-3")))
        .await
        .unwrap();
    assert_eq!(page.meta.current, 1);
    assert_eq!(page.meta.page_size, 10);
    assert_eq!(page.result.len(), 10);
}

#[tokio::test]
async fn test_soft_deleted_articles_are_invisible() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let author = register(&ctx, "Author").await;
    let kept = write_article(&ctx, &author, "Kept").await;
    let gone = write_article(&ctx, &author, "Gone").await;
    let service = ArticleService::new(&ctx);

    let removed = service.remove(&author, &gone.to_string()).await.unwrap();
    assert_eq!(removed.message, "Article deleted successfully");

    let page = service.list("", PageRequest::default()).await.unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.result[0]["id"], kept.to_string());

    let err = service.get(&gone.to_string()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::ArticleNotFound(_))));

    // the record still exists, with deletion stamped
    let mut filter = Filter::new();
    filter.push("isDeleted", Predicate::Eq(Scalar::Bool(true)));
    assert_eq!(store.articles().count(&filter).await.unwrap(), 1);
    assert!(load_article(&ctx, gone).await.is_none());
}

#[tokio::test]
async fn test_explicit_is_deleted_filter_wins() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let author = register(&ctx, "Author").await;
    write_article(&ctx, &author, "Kept").await;
    let gone = write_article(&ctx, &author, "Gone").await;
    let service = ArticleService::new(&ctx);
    service.remove(&author, &gone.to_string()).await.unwrap();

    let page = service
        .list("isDeleted=true", PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.result[0]["title"], "Gone");
    assert_eq!(page.result[0]["deletedBy"]["email"], author.email);
}

#[tokio::test]
async fn test_reserved_keys_never_filter() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let author = register(&ctx, "Author").await;
    for title in ["foo", "bar", "foo", "baz"] {
        write_article(&ctx, &author, title).await;
    }

    let page = ArticleService::new(&ctx)
        .list("current=1&pageSize=5&title=foo", PageRequest::new(1, 5))
        .await
        .unwrap();
    assert_eq!(page.meta.total, 2);
    assert!(page.result.iter().all(|doc| doc["title"] == "foo"));
}

#[tokio::test]
async fn test_unparseable_created_since_is_ignored() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let author = register(&ctx, "Author").await;
    write_article(&ctx, &author, "One").await;
    write_article(&ctx, &author, "Two").await;
    let service = ArticleService::new(&ctx);

    let page = service
        .list("createdSince=not-a-date", PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 2);

    let future = service
        .list("createdSince=2999-01-01", PageRequest::default())
        .await
        .unwrap();
    assert_eq!(future.meta.total, 0);
}

#[tokio::test]
async fn test_sort_projection_and_default_population() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let author = register(&ctx, "Author").await;
    for title in ["b", "c", "a"] {
        write_article(&ctx, &author, title).await;
    }
    let service = ArticleService::new(&ctx);

    let page = service
        .list("sort=-title&fields=-content", PageRequest::default())
        .await
        .unwrap();
    let titles: Vec<_> = page
        .result
        .iter()
        .map(|doc| doc["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["c", "b", "a"]);

    let first = &page.result[0];
    assert!(!first.contains_key("content"));
    let populated = first["author"].as_object().unwrap();
    assert_eq!(populated["email"], author.email);
    assert!(populated.contains_key("name"));
    assert!(!populated.contains_key("avatar"));
}

#[tokio::test]
async fn test_list_mine_and_ownership() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let alice = register(&ctx, "Alice").await;
    let bob = register(&ctx, "Bob").await;
    let mine = write_article(&ctx, &alice, "Mine").await;
    write_article(&ctx, &bob, "Theirs").await;
    let service = ArticleService::new(&ctx);

    let raw = format!("author={}", bob.id);
    let page = service
        .list_mine(alice.id, &raw, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 1);
    assert_eq!(page.result[0]["id"], mine.to_string());

    let request = UpdateArticleRequest {
        title: Some("Stolen".to_string()),
        ..Default::default()
    };
    let err = service
        .update(&bob, &mine.to_string(), request.clone())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(service.remove(&bob, &mine.to_string()).await.is_err());

    let updated = service
        .update(&alice, &mine.to_string(), request)
        .await
        .unwrap();
    assert_eq!(updated.message, "Article updated successfully");
    assert_eq!(updated.data.title, "Stolen");
    assert_eq!(updated.data.content, "Mine body");
    assert_eq!(
        updated.data.updated_by.map(|by| by.email),
        Some(alice.email.clone())
    );
}

#[tokio::test]
async fn test_get_is_readable_by_anyone_and_rejects_bad_ids() {
    let store = MemoryStore::new();
    let ctx = context(&store);
    let author = register(&ctx, "Author").await;
    let article = write_article(&ctx, &author, "Public").await;
    let service = ArticleService::new(&ctx);

    let found = service.get(&article.to_string()).await.unwrap();
    assert_eq!(found.message, "Article found");
    assert_eq!(found.data["author"]["name"], "Author");

    let err = service.get("12345").await.unwrap_err();
    assert_eq!(err.status_code(), 400);
}
