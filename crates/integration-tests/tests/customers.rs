//! Integration tests for customer persistence and queries.
//!
//! These tests require a running `PostgreSQL` server reachable through
//! `DATABASE_URL`.
//!
//! Run with: cargo test -p lunchly-integration-tests -- --ignored

use sqlx::PgPool;

use lunchly::db::CustomerRepository;
use lunchly::models::Customer;
use lunchly::{CustomerId, RepositoryError};
use lunchly_integration_tests::{book, insert_customer};

fn names(customers: &[Customer]) -> Vec<String> {
    customers.iter().map(Customer::full_name).collect()
}

// ============================================================================
// Save & Lookup
// ============================================================================

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_save_then_get_returns_equal_customer(pool: PgPool) {
    let repo = CustomerRepository::new(&pool);
    let mut customer = Customer::new(
        "Ana",
        "Diaz",
        Some("555-0100".to_owned()),
        Some("Allergic to shellfish".to_owned()),
    );

    repo.save(&mut customer).await.expect("save customer");
    let id = customer.id().expect("id assigned on insert");

    let fetched = repo.get(id).await.expect("get customer");
    assert_eq!(fetched, customer);
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_save_persisted_customer_updates_in_place(pool: PgPool) {
    let repo = CustomerRepository::new(&pool);
    let mut customer = insert_customer(&pool, "Ana", "Diaz").await;
    let id = customer.id();

    customer.last_name = "Diaz-Ruiz".to_owned();
    customer.phone = Some("555-0199".to_owned());
    repo.save(&mut customer).await.expect("update customer");
    repo.save(&mut customer).await.expect("repeat update");

    assert_eq!(customer.id(), id);
    let all = repo.all().await.expect("list customers");
    assert_eq!(names(&all), ["Ana Diaz-Ruiz"]);
    assert_eq!(all[0].phone.as_deref(), Some("555-0199"));
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_each_transient_save_inserts_a_row(pool: PgPool) {
    let repo = CustomerRepository::new(&pool);
    let template = Customer::new("Bo", "Chen", None, None);

    let mut first = template.clone();
    let mut second = template;
    repo.save(&mut first).await.expect("first insert");
    repo.save(&mut second).await.expect("second insert");

    assert_ne!(first.id(), second.id());
    assert_eq!(repo.all().await.expect("list").len(), 2);
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_get_missing_customer_is_not_found(pool: PgPool) {
    let err = CustomerRepository::new(&pool)
        .get(CustomerId::new(4242))
        .await
        .expect_err("no such customer");

    assert!(matches!(
        err,
        RepositoryError::NotFound {
            entity: "customer",
            id: 4242
        }
    ));
    assert_eq!(err.status_code(), 404);
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_save_after_row_deleted_is_not_found(pool: PgPool) {
    let repo = CustomerRepository::new(&pool);
    let id = insert_customer(&pool, "Ana", "Diaz")
        .await
        .id()
        .expect("saved");
    let mut customer = repo.get(id).await.expect("get customer");

    sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .expect("delete row");

    customer.phone = Some("555-0199".to_owned());
    let err = repo.save(&mut customer).await.expect_err("row is gone");
    assert!(err.is_not_found());
    assert!(repo.all().await.expect("list").is_empty());
}

// ============================================================================
// Listing & Search
// ============================================================================

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_all_orders_by_last_then_first_name(pool: PgPool) {
    insert_customer(&pool, "Zoe", "Adams").await;
    insert_customer(&pool, "Bo", "Chen").await;
    insert_customer(&pool, "Amy", "Adams").await;

    let all = CustomerRepository::new(&pool).all().await.expect("list");
    assert_eq!(names(&all), ["Amy Adams", "Zoe Adams", "Bo Chen"]);
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_search_is_case_insensitive_on_either_name(pool: PgPool) {
    insert_customer(&pool, "Ana", "Diaz").await;
    insert_customer(&pool, "Bo", "Chen").await;
    insert_customer(&pool, "Dana", "Brown").await;
    let repo = CustomerRepository::new(&pool);

    let by_first = repo.search("an").await.expect("search an");
    assert_eq!(names(&by_first), ["Dana Brown", "Ana Diaz"]);

    let by_last = repo.search("DIA").await.expect("search DIA");
    assert_eq!(names(&by_last), ["Ana Diaz"]);

    let none = repo.search("xyz").await.expect("search xyz");
    assert!(none.is_empty());
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_empty_search_returns_everyone(pool: PgPool) {
    insert_customer(&pool, "Ana", "Diaz").await;
    insert_customer(&pool, "Bo", "Chen").await;

    let found = CustomerRepository::new(&pool)
        .search("")
        .await
        .expect("search");
    assert_eq!(found.len(), 2);
}

// ============================================================================
// Ranking
// ============================================================================

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_top_ranked_orders_by_reservation_count(pool: PgPool) {
    let light = insert_customer(&pool, "Bo", "Chen").await;
    let heavy = insert_customer(&pool, "Ana", "Diaz").await;
    let idle = insert_customer(&pool, "Carla", "Okafor").await;

    book(&pool, &light, 1, 2).await;
    for day in 0..3 {
        book(&pool, &heavy, day, 4).await;
    }

    let top = CustomerRepository::new(&pool)
        .top_ten()
        .await
        .expect("top ten");

    assert_eq!(names(&top), ["Ana Diaz", "Bo Chen"]);
    assert!(top.iter().all(|c| c.id() != idle.id()));
    assert_eq!(top[0], heavy);
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_top_ranked_respects_limit(pool: PgPool) {
    for (first, last) in [("Ana", "Diaz"), ("Bo", "Chen"), ("Carla", "Okafor")] {
        let customer = insert_customer(&pool, first, last).await;
        book(&pool, &customer, 0, 2).await;
    }

    let repo = CustomerRepository::new(&pool);
    assert_eq!(repo.top_ranked(2).await.expect("top 2").len(), 2);
    assert!(repo.top_ranked(0).await.expect("top 0").is_empty());
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_top_ranked_ties_break_by_customer_id(pool: PgPool) {
    let zed = insert_customer(&pool, "Zed", "Zulu").await;
    let amy = insert_customer(&pool, "Amy", "Adams").await;
    book(&pool, &zed, 0, 2).await;
    book(&pool, &amy, 1, 2).await;

    let top = CustomerRepository::new(&pool)
        .top_ten()
        .await
        .expect("top ten");
    assert_eq!(names(&top), ["Zed Zulu", "Amy Adams"]);
}

// ============================================================================
// Reservations via Customer
// ============================================================================

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_customer_reservations_delegate_to_reservation_lookup(pool: PgPool) {
    let ana = insert_customer(&pool, "Ana", "Diaz").await;
    let bo = insert_customer(&pool, "Bo", "Chen").await;
    book(&pool, &ana, 0, 2).await;
    book(&pool, &ana, 1, 3).await;
    book(&pool, &bo, 2, 4).await;

    let repo = CustomerRepository::new(&pool);
    let reservations = repo.reservations(&ana).await.expect("ana's reservations");
    assert_eq!(reservations.len(), 2);
    assert!(reservations.iter().all(|r| Some(r.customer_id()) == ana.id()));

    let unsaved = Customer::new("New", "Guest", None, None);
    assert!(repo.reservations(&unsaved).await.expect("unsaved").is_empty());
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_most_recent_reservation_has_latest_start(pool: PgPool) {
    let ana = insert_customer(&pool, "Ana", "Diaz").await;
    book(&pool, &ana, 2, 2).await;
    let latest = book(&pool, &ana, 9, 5).await;
    book(&pool, &ana, 4, 3).await;

    let most_recent = CustomerRepository::new(&pool)
        .most_recent_reservation(&ana)
        .await
        .expect("most recent");
    assert_eq!(most_recent, latest);
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_most_recent_reservation_without_any_is_not_found(pool: PgPool) {
    let ana = insert_customer(&pool, "Ana", "Diaz").await;

    let err = CustomerRepository::new(&pool)
        .most_recent_reservation(&ana)
        .await
        .expect_err("no reservations yet");
    assert!(err.is_not_found());
}

#[sqlx::test(migrator = "lunchly::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_most_recent_reservation_for_unsaved_customer(pool: PgPool) {
    let unsaved = Customer::new("New", "Guest", None, None);

    let err = CustomerRepository::new(&pool)
        .most_recent_reservation(&unsaved)
        .await
        .expect_err("never saved");
    assert!(matches!(
        err,
        RepositoryError::NotPersisted { entity: "customer" }
    ));
    assert_eq!(err.status_code(), 404);
}
