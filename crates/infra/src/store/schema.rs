//! Idempotent Postgres schema bootstrap.
//!
//! `purchases.item_id` is indexed but deliberately not unique: single-sale is
//! enforced by the row lock and the status check, not by the log.

use sqlx::PgPool;
use tracing::{info, instrument};

use bazaar_catalog::DEFAULT_CATEGORIES;

use super::postgres::map_sqlx_error;
use super::r#trait::StoreError;

const STATEMENTS: &[(&str, &str)] = &[
    (
        "create_categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id   BIGINT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    ),
    (
        "create_users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            BIGSERIAL PRIMARY KEY,
            name          TEXT NOT NULL,
            age           INTEGER NOT NULL CHECK (age BETWEEN 20 AND 80),
            registered_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "create_items",
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id          BIGSERIAL PRIMARY KEY,
            seller_id   BIGINT NOT NULL,
            category_id BIGINT NOT NULL REFERENCES categories (id),
            name        TEXT NOT NULL,
            price       BIGINT NOT NULL CHECK (price > 0),
            description TEXT NOT NULL DEFAULT '',
            image_name  TEXT NOT NULL DEFAULT '',
            status      TEXT NOT NULL DEFAULT 'ON_SALE'
                        CHECK (status IN ('ON_SALE', 'SOLD_OUT'))
        )
        "#,
    ),
    (
        "create_purchases",
        r#"
        CREATE TABLE IF NOT EXISTS purchases (
            id         BIGSERIAL PRIMARY KEY,
            item_id    BIGINT NOT NULL REFERENCES items (id),
            buyer_id   BIGINT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "index_purchases_item",
        "CREATE INDEX IF NOT EXISTS purchases_item_id_idx ON purchases (item_id)",
    ),
    (
        "index_purchases_buyer",
        "CREATE INDEX IF NOT EXISTS purchases_buyer_id_idx ON purchases (buyer_id)",
    ),
    (
        "create_messages",
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id          BIGSERIAL PRIMARY KEY,
            item_id     BIGINT NOT NULL,
            sender_id   BIGINT NOT NULL,
            receiver_id BIGINT NOT NULL,
            content     TEXT NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "index_messages_item",
        "CREATE INDEX IF NOT EXISTS messages_item_id_idx ON messages (item_id)",
    ),
];

/// Create every table and index the marketplace needs, if missing, and seed
/// the default categories.
#[instrument(skip(pool), err)]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    for (operation, sql) in STATEMENTS {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
    }
    for (id, name) in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(*id)
            .bind(*name)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("seed_categories", e))?;
    }
    info!(
        statements = STATEMENTS.len(),
        categories = DEFAULT_CATEGORIES.len(),
        "database schema ready"
    );
    Ok(())
}
