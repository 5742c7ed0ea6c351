//! Schema-wide conventions every migration must follow, and seed data the
//! Rust code relies on.

use seguridad_core::roles::{STAFF_ROLES, ROLE_CITIZEN, ROLE_DRIVER};
use seguridad_core::status::{DenunciaStatus, RequestStatus, ResourceStatus, StatusId};
use sqlx::PgPool;

/// `*_statuses` lookup tables use smallint ids; every other table uses bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_correct_type(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        let expected = if table.ends_with("_statuses") { "smallint" } else { "bigint" };
        assert_eq!(data_type, expected, "Table {table}.id has the wrong type");
    }
}

/// Every table must carry `created_at` and `updated_at` as timestamptz and
/// an `updated_at` trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps_and_trigger(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }

        let has_trigger: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.triggers
                WHERE event_object_schema = 'public'
                  AND event_object_table = $1
                  AND trigger_name = 'set_updated_at'
            )",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(has_trigger.0, "Table {table} has no set_updated_at trigger");
    }
}

/// No character varying columns should exist; TEXT is used throughout.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// Every foreign key column must have a corresponding index.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_indexes(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT
             tc.table_name,
             kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, column) in &fk_columns {
        let has_index: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = $1
                  AND indexdef LIKE '%(' || $2 || ')%'
            )",
        )
        .bind(table)
        .bind(column)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index.0, "FK column {table}.{column} has no index");
    }
}

/// Every foreign key must declare an explicit `ON DELETE` rule.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_explicit_delete_rule(pool: PgPool) {
    let fk_rules: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT
             rc.constraint_name,
             tc.table_name,
             rc.delete_rule
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
             ON rc.constraint_name = tc.constraint_name
             AND rc.constraint_schema = tc.table_schema
         WHERE rc.constraint_schema = 'public'
         ORDER BY tc.table_name, rc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fk_rules.is_empty(), "Expected at least one FK constraint");
    for (constraint, table, delete_rule) in &fk_rules {
        assert_ne!(
            delete_rule, "NO ACTION",
            "FK {constraint} on {table} relies on the implicit NO ACTION rule"
        );
    }
}

/// Unique constraints are named `uq_*` so the API can map violations to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT constraint_name
         FROM information_schema.table_constraints
         WHERE constraint_schema = 'public'
           AND constraint_type = 'UNIQUE'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "Unique constraint {name} lacks the uq_ prefix");
    }
}

/// Lookup table seeds match the status enums in the core crate.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_seeds(pool: PgPool) {
    for (table, expected) in [
        ("resource_statuses", ["available", "maintenance", "assigned", "inactive"]),
        ("denuncia_statuses", ["received", "in_progress", "completed", "cancelled"]),
        ("request_statuses", ["pending", "in_review", "approved", "rejected"]),
    ] {
        let names: Vec<String> =
            sqlx::query_scalar(&format!("SELECT name FROM {table} ORDER BY id"))
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(names, expected, "seed mismatch in {table}");
    }
}

async fn seeded_statuses(pool: &PgPool, table: &str) -> Vec<(StatusId, String)> {
    sqlx::query_as(&format!("SELECT id, name FROM {table} ORDER BY id"))
        .fetch_all(pool)
        .await
        .unwrap()
}

/// Status lookup rows line up with the discriminants of the core enums.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_seeds_match_core_enums(pool: PgPool) {
    let resource = seeded_statuses(&pool, "resource_statuses").await;
    assert_eq!(resource.len(), 4);
    assert_eq!(resource[0], (ResourceStatus::Available.id(), "available".to_string()));
    assert_eq!(resource[2], (ResourceStatus::Assigned.id(), "assigned".to_string()));

    let denuncia = seeded_statuses(&pool, "denuncia_statuses").await;
    assert_eq!(denuncia.len(), 4);
    assert_eq!(denuncia[0].0, DenunciaStatus::Received.id());
    assert_eq!(denuncia[3].0, DenunciaStatus::Cancelled.id());

    let request = seeded_statuses(&pool, "request_statuses").await;
    assert_eq!(request.len(), 4);
    assert_eq!(request[0], (RequestStatus::Pending.id(), "pending".to_string()));
    assert_eq!(request[3], (RequestStatus::Rejected.id(), "rejected".to_string()));
}

/// Every role name the code checks for is seeded, in lowercase.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_roles_cover_core_constants(pool: PgPool) {
    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();

    for role in STAFF_ROLES.iter().chain([&ROLE_DRIVER, &ROLE_CITIZEN]) {
        assert!(names.iter().any(|n| n == role), "Role {role} is not seeded");
    }
    assert!(names.iter().all(|n| *n == n.to_lowercase()));
}
