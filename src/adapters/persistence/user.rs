use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::user::{NewUser, UserRepo},
    domain::entities::user::{User, UserRole},
};

const USER_COLUMNS: &str =
    "id, external_subject_id, email, first_name, last_name, role, created_at, updated_at";

fn row_to_user(row: sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        external_subject_id: row.get("external_subject_id"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        role: row.get("role"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn find_by_subject(&self, external_subject_id: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE external_subject_id = $1"
        ))
        .bind(external_subject_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(row_to_user))
    }

    async fn insert_if_absent(&self, new_user: &NewUser) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, external_subject_id, email, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (external_subject_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.external_subject_id)
        .bind(&new_user.email)
        .bind(new_user.role)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(row_to_user))
    }

    async fn update_name(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn set_role(&self, user_id: Uuid, role: UserRole) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET role = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        // quotes go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.get("total"))
    }
}
