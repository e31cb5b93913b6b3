use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::quote::{NewQuote, QuoteRepo, QuoteTotals},
    domain::entities::quote::{Quote, QuoteWithOwner},
};

fn row_to_quote(row: &sqlx::postgres::PgRow) -> Quote {
    Quote {
        id: row.get("id"),
        user_id: row.get("user_id"),
        event_type: row.get("event_type"),
        event_date: row.get("event_date"),
        location: row.get("location"),
        attendees: row.get("attendees"),
        quote_amount_cents: row.get("quote_amount_cents"),
        created_at: row.get("created_at"),
    }
}

fn row_to_quote_with_owner(row: sqlx::postgres::PgRow) -> QuoteWithOwner {
    QuoteWithOwner {
        quote: row_to_quote(&row),
        email: row.get("email"),
    }
}

#[async_trait]
impl QuoteRepo for PostgresPersistence {
    async fn create(&self, new_quote: &NewQuote) -> AppResult<Quote> {
        let row = sqlx::query(
            r#"
            INSERT INTO quotes (id, user_id, event_type, event_date, location, attendees, quote_amount_cents)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, event_type, event_date, location, attendees, quote_amount_cents, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_quote.user_id)
        .bind(&new_quote.event_type)
        .bind(new_quote.event_date)
        .bind(&new_quote.location)
        .bind(new_quote.attendees)
        .bind(new_quote.quote_amount_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row_to_quote(&row))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Quote>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, event_type, event_date, location, attendees, quote_amount_cents, created_at
            FROM quotes
            WHERE user_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.iter().map(row_to_quote).collect())
    }

    async fn list_with_owner(&self) -> AppResult<Vec<QuoteWithOwner>> {
        let rows = sqlx::query(
            r#"
            SELECT q.id, q.user_id, q.event_type, q.event_date, q.location,
                   q.attendees, q.quote_amount_cents, q.created_at, u.email
            FROM quotes q
            JOIN users u ON u.id = q.user_id
            ORDER BY q.created_at DESC, q.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_quote_with_owner).collect())
    }

    async fn delete(&self, quote_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(quote_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn totals(&self) -> AppResult<QuoteTotals> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count,
                   COALESCE(SUM(quote_amount_cents), 0)::BIGINT AS revenue_cents
            FROM quotes
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(QuoteTotals {
            count: row.get("count"),
            revenue_cents: row.get("revenue_cents"),
        })
    }
}
