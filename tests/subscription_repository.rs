//! Integration tests for the PostgreSQL subscription repository
//!
//! These run against a real database and are skipped when `DATABASE_URL`
//! is not set. Every test works on its own random `user_id` so they can
//! share one table.

use chrono::NaiveDate;
use sqlx::PgPool;
use subscription_service::prelude::*;
use uuid::Uuid;

static SCHEMA_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

async fn setup() -> Option<PgSubscriptionRepository> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    {
        let _guard = SCHEMA_LOCK.lock().await;
        App::from_pool(pool.clone())
            .bootstrap_schema()
            .await
            .expect("Failed to bootstrap schema");
    }

    let table = subscription_service::repository::subscription_table().unwrap();
    Some(PgSubscriptionRepository::new(pool, table))
}

fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

fn subscription(user_id: Uuid, service_name: &str, price: i64, start: NaiveDate) -> NewSubscription {
    NewSubscription {
        service_name: service_name.to_string(),
        user_id,
        price,
        start_date: start,
        end_date: None,
    }
}

fn owner_filter(user_id: Uuid) -> FilterParams {
    FilterParams {
        user_id,
        ..Default::default()
    }
}

async fn cleanup(repo: &PgSubscriptionRepository, user_id: Uuid) {
    let _ = sqlx::query("DELETE FROM subscription WHERE user_id = $1")
        .bind(user_id)
        .execute(repo.pool())
        .await;
}

#[tokio::test]
async fn test_crud_roundtrip() {
    let Some(repo) = setup().await else { return };
    let user_id = Uuid::new_v4();

    let created = repo
        .create(subscription(user_id, "Yandex Plus", 400, month(2025, 7)))
        .await
        .expect("Failed to create subscription");
    assert!(created.id > 0);
    assert_eq!(created.end_date, None);

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.service_name, "Yandex Plus");
    assert_eq!(fetched.start_date, month(2025, 7));

    let updated = repo
        .update(
            created.id,
            UpdateSubscription {
                price: Some(500),
                end_date: Some(month(2026, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 500);
    assert_eq!(updated.end_date, Some(month(2026, 1)));
    assert_eq!(updated.service_name, "Yandex Plus");
    assert!(updated.updated_at >= created.updated_at);

    repo.delete(created.id).await.unwrap();
    assert!(repo.get_by_id(created.id).await.unwrap_err().is_not_found());
    assert!(repo.delete(created.id).await.unwrap_err().is_not_found());

    cleanup(&repo, user_id).await;
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let Some(repo) = setup().await else { return };

    let err = repo
        .update(
            i64::MAX,
            UpdateSubscription {
                price: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_clamps_past_last_page() {
    let Some(repo) = setup().await else { return };
    let user_id = Uuid::new_v4();

    for i in 0..23 {
        repo.create(subscription(user_id, &format!("Service {:02}", i), 100, month(2025, 1)))
            .await
            .unwrap();
    }

    let criteria = QueryCriteria {
        filter: owner_filter(user_id),
        pagination: PaginationParams::new(5, 10).unwrap(),
        sort: SortParams {
            sort_by: Some(SortBy::ServiceName),
            sort_order: store_object::SortOrder::Asc,
        },
    };

    let list = repo.list(&criteria).await.unwrap();
    assert_eq!(list.info.total_count, 23);
    assert_eq!(list.info.total_pages, 3);
    assert_eq!(list.info.page, 3);
    assert_eq!(list.info.page_size, 3);
    let names: Vec<&str> = list.data.iter().map(|s| s.service_name.as_str()).collect();
    assert_eq!(names, vec!["Service 20", "Service 21", "Service 22"]);

    cleanup(&repo, user_id).await;
}

#[tokio::test]
async fn test_list_filters_and_sort() {
    let Some(repo) = setup().await else { return };
    let user_id = Uuid::new_v4();

    repo.create(subscription(user_id, "Netflix", 100, month(2024, 12)))
        .await
        .unwrap();
    repo.create(subscription(user_id, "Netflix Premium", 200, month(2025, 3)))
        .await
        .unwrap();
    repo.create(subscription(user_id, "Spotify", 300, month(2025, 6)))
        .await
        .unwrap();

    let criteria = QueryCriteria {
        filter: FilterParams {
            service_name: Some("Netflix%".to_string()),
            user_id,
            start_date: DateRange {
                from: Some(month(2025, 1)),
                to: None,
            },
        },
        pagination: PaginationParams::default(),
        sort: SortParams {
            sort_by: Some(SortBy::Id),
            sort_order: store_object::SortOrder::Desc,
        },
    };

    let list = repo.list(&criteria).await.unwrap();
    assert_eq!(list.info.total_count, 1);
    assert_eq!(list.data[0].service_name, "Netflix Premium");

    let criteria = QueryCriteria {
        filter: owner_filter(user_id),
        ..criteria
    };
    let list = repo.list(&criteria).await.unwrap();
    let ids: Vec<i64> = list.data.iter().map(|s| s.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);

    cleanup(&repo, user_id).await;
}

#[tokio::test]
async fn test_cost_sums_exact_matches() {
    let Some(repo) = setup().await else { return };
    let user_id = Uuid::new_v4();

    repo.create(subscription(user_id, "Netflix", 100, month(2025, 1)))
        .await
        .unwrap();
    repo.create(subscription(user_id, "Netflix", 150, month(2025, 2)))
        .await
        .unwrap();
    repo.create(subscription(user_id, "Netflix Premium", 999, month(2025, 2)))
        .await
        .unwrap();

    let cost = repo
        .get_cost(&FilterParams {
            service_name: Some("Netflix".to_string()),
            user_id,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cost, 250);

    let cost = repo
        .get_cost(&FilterParams {
            service_name: Some("Nothing here".to_string()),
            user_id,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cost, 0);

    cleanup(&repo, user_id).await;
}
