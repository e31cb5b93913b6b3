use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::event_type::EventTypeRepo,
    domain::entities::event_type::EventType,
};

fn row_to_event_type(row: sqlx::postgres::PgRow) -> EventType {
    EventType {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl EventTypeRepo for PostgresPersistence {
    async fn list(&self) -> AppResult<Vec<EventType>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM event_types ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_event_type).collect())
    }

    async fn create(&self, name: &str) -> AppResult<EventType> {
        let row = sqlx::query(
            r#"
            INSERT INTO event_types (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row_to_event_type(row))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM event_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
