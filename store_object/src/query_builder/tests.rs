use chrono::NaiveDate;
use uuid::Uuid;

use crate::query_builder::{
    InsertBuilder, Pagination, QueryBuilder, QueryFilter, SelectField, SortOrder, SqlValue,
    UpdateSet,
};
use crate::table::TableSpec;
use crate::validation::ValidationError;

fn subscription_table() -> TableSpec {
    TableSpec::new(
        "subscription",
        &["id", "service_name", "user_id", "price", "start_date", "end_date"],
    )
    .unwrap()
}

fn date(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

// ========================================
// SELECT rendering
// ========================================

#[test]
fn test_select_without_clauses() {
    let statement = QueryBuilder::new().select(&subscription_table()).unwrap();
    assert_eq!(
        statement.sql,
        "SELECT id, service_name, user_id, price, start_date, end_date FROM subscription"
    );
    assert!(statement.values.is_empty());
}

#[test]
fn test_select_with_all_filters_in_order() {
    let user_id = Uuid::new_v4();
    let table = TableSpec::new("test", &[]).unwrap();

    let statement = QueryBuilder::new()
        .filter(QueryFilter::like("service_name", "Yandex%"))
        .filter(QueryFilter::eq("user_id", user_id))
        .filter(QueryFilter::gte("start_date", date(2025, 1)))
        .filter(QueryFilter::lte("start_date", date(2025, 12)))
        .select(&table)
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT * FROM test WHERE service_name LIKE $1 AND user_id = $2 AND start_date >= $3 AND start_date <= $4"
    );
    assert_eq!(
        statement.values,
        vec![
            SqlValue::Text("Yandex%".to_string()),
            SqlValue::Uuid(user_id),
            SqlValue::Date(date(2025, 1)),
            SqlValue::Date(date(2025, 12)),
        ]
    );
}

#[test]
fn test_clause_order_is_where_order_limit_offset() {
    let statement = QueryBuilder::new()
        .filter(QueryFilter::eq("price", 100_i64))
        .order_by("id", SortOrder::Desc)
        .pagination(Pagination::new().with_limit(20).with_offset(40))
        .select(&TableSpec::new("test", &[]).unwrap())
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT * FROM test WHERE price = $1 ORDER BY id DESC LIMIT 20 OFFSET 40"
    );
}

#[test]
fn test_multiple_order_fields() {
    let (_, order_clause, _, _) = QueryBuilder::new()
        .order_by("service_name", SortOrder::Asc)
        .order_by("id", SortOrder::Desc)
        .build()
        .unwrap();

    assert_eq!(order_clause, "ORDER BY service_name ASC, id DESC");
}

#[test]
fn test_pagination_replaces_previous_window() {
    let builder = QueryBuilder::new()
        .pagination(Pagination::new().with_limit(5).with_offset(10))
        .pagination(Pagination::new().with_limit(13));

    assert_eq!(builder.build_limit_clause(), "LIMIT 13");
}

#[test]
fn test_select_aggregate() {
    let statement = QueryBuilder::new()
        .filter(QueryFilter::eq("service_name", "Netflix"))
        .select_fields(
            &subscription_table(),
            &[SelectField::sum("price").or_zero().with_alias("total")],
        )
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT COALESCE(SUM(price), 0)::BIGINT AS total FROM subscription WHERE service_name = $1"
    );
}

// ========================================
// COUNT / UPDATE / DELETE
// ========================================

#[test]
fn test_count_ignores_order_and_window() {
    let statement = QueryBuilder::new()
        .filter(QueryFilter::like("service_name", "%"))
        .order_by("id", SortOrder::Asc)
        .pagination(Pagination::new().with_limit(10).with_offset(0))
        .count(&subscription_table())
        .unwrap();

    assert_eq!(
        statement.sql,
        "SELECT COUNT(*) FROM subscription WHERE service_name LIKE $1"
    );
    assert_eq!(statement.values.len(), 1);
}

#[test]
fn test_update_numbers_where_after_set() {
    let set = UpdateSet::new()
        .set("service_name", "Spotify")
        .set("price", 299_i64)
        .touch("updated_at");

    let statement = QueryBuilder::new()
        .filter(QueryFilter::eq("id", 7_i64))
        .update(&subscription_table(), &set)
        .unwrap();

    assert_eq!(
        statement.sql,
        "UPDATE subscription SET service_name = $1, price = $2, updated_at = NOW() WHERE id = $3 RETURNING id, service_name, user_id, price, start_date, end_date"
    );
    assert_eq!(
        statement.values,
        vec![
            SqlValue::Text("Spotify".to_string()),
            SqlValue::BigInt(299),
            SqlValue::BigInt(7),
        ]
    );
}

#[test]
fn test_update_requires_assignments() {
    let result = QueryBuilder::new()
        .filter(QueryFilter::eq("id", 1_i64))
        .update(&subscription_table(), &UpdateSet::new());

    assert_eq!(result.unwrap_err(), ValidationError::NoColumns("UPDATE"));
}

#[test]
fn test_delete() {
    let statement = QueryBuilder::new()
        .filter(QueryFilter::eq("id", 3_i64))
        .delete(&subscription_table())
        .unwrap();

    assert_eq!(statement.sql, "DELETE FROM subscription WHERE id = $1");
    assert_eq!(statement.values, vec![SqlValue::BigInt(3)]);
}

#[test]
fn test_insert_through_reexport() {
    let statement = InsertBuilder::new()
        .value("service_name", "Netflix")
        .build(&subscription_table())
        .unwrap();
    assert!(statement.sql.starts_with("INSERT INTO subscription (service_name) VALUES ($1)"));
}

// ========================================
// Injection and identifier edge cases
// ========================================

#[test]
fn test_values_never_reach_sql_text() {
    let hostile = "'; DROP TABLE subscription; --";
    let statement = QueryBuilder::new()
        .filter(QueryFilter::eq("service_name", hostile))
        .select(&subscription_table())
        .unwrap();

    assert!(!statement.sql.contains("DROP"));
    assert_eq!(statement.values, vec![SqlValue::Text(hostile.to_string())]);
}

#[test]
fn test_like_wildcards_pass_through() {
    let (where_clause, _, _, values) = QueryBuilder::new()
        .filter(QueryFilter::like("service_name", "50%_off"))
        .build()
        .unwrap();

    assert_eq!(where_clause, "WHERE service_name LIKE $1");
    assert_eq!(values, vec![SqlValue::Text("50%_off".to_string())]);
}

#[test]
fn test_invalid_order_field_is_rejected() {
    let result = QueryBuilder::new()
        .order_by("id; DROP TABLE subscription", SortOrder::Asc)
        .select(&subscription_table());

    assert!(matches!(result, Err(ValidationError::InvalidCharacters(_))));
}

#[test]
fn test_many_conditions_keep_numbering() {
    let builder = (0..50_i64).fold(QueryBuilder::new(), |builder, i| {
        builder.filter(QueryFilter::eq(&format!("field_{}", i), i))
    });

    let (where_clause, _, _, values) = builder.build().unwrap();
    assert_eq!(values.len(), 50);
    assert!(where_clause.ends_with("field_49 = $50"));
}
