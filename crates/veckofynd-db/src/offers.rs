//! Database operations for the `offers` table.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use veckofynd_core::NormalizedOffer;

use crate::DbError;

/// A row from the `offers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OfferRow {
    pub id: i64,
    pub name: String,
    pub price: Option<f64>,
    pub quantity: Option<String>,
    pub comparison_price: Option<String>,
    pub store: String,
    pub valid_from: Option<NaiveDate>,
    pub valid_through: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub scraped_at: DateTime<Utc>,
}

/// Replaces the stored offer set with `offers`, in one transaction:
/// existing rows are deleted and the whole batch is inserted. A failure
/// anywhere rolls the run back, so readers never observe a half-written
/// week.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement in the transaction fails.
pub async fn replace_offers(pool: &PgPool, offers: &[NormalizedOffer]) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM offers")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for offer in offers {
        sqlx::query(
            "INSERT INTO offers \
             (name, price, quantity, comparison_price, store, valid_from, valid_through, valid_until) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&offer.name)
        .bind(offer.price)
        .bind(&offer.quantity)
        .bind(&offer.comparison_price)
        .bind(&offer.store)
        .bind(offer.valid_from)
        .bind(offer.valid_through)
        .bind(offer.valid_until)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        written = offers.len(),
        replaced = deleted,
        "offer table replaced"
    );
    Ok(offers.len() as u64)
}

/// Returns all stored offers, most recently scraped first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_offers(pool: &PgPool) -> Result<Vec<OfferRow>, DbError> {
    let rows = sqlx::query_as::<_, OfferRow>(
        "SELECT id, name, price, quantity, comparison_price, store, \
         valid_from, valid_through, valid_until, scraped_at \
         FROM offers ORDER BY scraped_at DESC, id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Returns the number of stored offers.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn count_offers(pool: &PgPool) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM offers")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
