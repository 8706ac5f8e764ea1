//! PostgreSQL adapter tests. `#[sqlx::test]` creates a fresh database per test
//! from `DATABASE_URL` and applies the migrations.

use chrono::{SubsecRound, Utc};
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use shorturls::domain::entities::NewLink;
use shorturls::domain::repositories::{LinkRepository, SequenceCounter};
use shorturls::error::AppError;
use shorturls::infrastructure::persistence::{PgLinkRepository, PgSequenceCounter};

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        long_url: url.to_string(),
    }
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    // TIMESTAMPTZ keeps microseconds
    let before = Utc::now().trunc_subsecs(6);

    let link = repo
        .create(new_link("abc12", "https://example.com"))
        .await
        .unwrap();

    assert!(link.id.is_some());
    assert_eq!(link.code, "abc12");
    assert!(link.created_at >= before);
    assert!(link.created_at <= Utc::now());

    let found = repo.find_by_code("abc12").await.unwrap().unwrap();
    assert_eq!(found.long_url, "https://example.com");
    assert_eq!(found.id, link.id);
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("missing").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup01", "https://a.com")).await.unwrap();
    let result = repo.create(new_link("dup01", "https://b.com")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_list_pagination(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    for code in ["A", "B", "C", "D", "E"] {
        repo.create(new_link(code, &format!("https://{code}.com")))
            .await
            .unwrap();
    }

    let codes = |links: Vec<shorturls::domain::entities::Link>| -> Vec<String> {
        links.into_iter().map(|l| l.code).collect()
    };

    assert_eq!(codes(repo.list(2, 0).await.unwrap()), ["A", "B"]);
    assert_eq!(codes(repo.list(2, 2).await.unwrap()), ["C", "D"]);
    assert_eq!(codes(repo.list(0, -1).await.unwrap()).len(), 5);
    assert_eq!(repo.count().await.unwrap(), 5);
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("del01", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(repo.delete("del01").await.unwrap(), 1);
    assert_eq!(repo.delete("del01").await.unwrap(), 0);
    assert_eq!(repo.delete("never").await.unwrap(), 0);
}

#[sqlx::test]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}

#[sqlx::test]
async fn test_counter_sequential(pool: PgPool) {
    let counter = PgSequenceCounter::new(Arc::new(pool), "links", 0);

    assert_eq!(counter.current().await.unwrap(), 0);
    assert_eq!(counter.increment_and_get().await.unwrap(), 1);
    assert_eq!(counter.increment_and_get().await.unwrap(), 2);
    assert_eq!(counter.current().await.unwrap(), 2);
}

#[sqlx::test]
async fn test_counter_floor_never_lowers(pool: PgPool) {
    let pool = Arc::new(pool);

    let counter = PgSequenceCounter::new(pool.clone(), "links", 100);
    assert_eq!(counter.increment_and_get().await.unwrap(), 101);

    let lower = PgSequenceCounter::new(pool, "links", 10);
    assert_eq!(lower.increment_and_get().await.unwrap(), 102);
}

#[sqlx::test]
async fn test_counter_concurrent_increments_are_unique(pool: PgPool) {
    let counter = Arc::new(PgSequenceCounter::new(Arc::new(pool), "links", 0));
    const N: u64 = 50;

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let counter = counter.clone();
            tokio::spawn(async move { counter.increment_and_get().await.unwrap() })
        })
        .collect();

    let mut values = HashSet::new();
    for handle in handles {
        values.insert(handle.await.unwrap());
    }

    assert_eq!(values, (1..=N).collect::<HashSet<_>>());
}
