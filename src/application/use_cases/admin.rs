use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{quote::QuoteRepo, user::UserRepo},
    domain::entities::{
        quote::{QuoteWithOwner, format_cents},
        user::{User, UserRole},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_quotes: i64,
    /// Sum of all quote amounts, two decimals.
    pub total_revenue: String,
}

/// Administrative operations over users and quotes. Callers must already have
/// passed the admin guard; `actor_id` is the admin performing the action.
#[derive(Clone)]
pub struct AdminUseCases {
    user_repo: Arc<dyn UserRepo>,
    quote_repo: Arc<dyn QuoteRepo>,
}

impl AdminUseCases {
    pub fn new(user_repo: Arc<dyn UserRepo>, quote_repo: Arc<dyn QuoteRepo>) -> Self {
        Self {
            user_repo,
            quote_repo,
        }
    }

    // ========================================================================
    // Users
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.list_all().await
    }

    /// Hard delete. The user's quotes go with it.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, actor_id: Uuid, user_id: Uuid) -> AppResult<()> {
        if actor_id == user_id {
            return Err(AppError::InvalidInput(
                "Administrators cannot delete their own account".into(),
            ));
        }
        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::NotFound);
        }
        info!(%user_id, "User deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_user_role(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        role: UserRole,
    ) -> AppResult<()> {
        if actor_id == user_id {
            return Err(AppError::InvalidInput(
                "Administrators cannot change their own role".into(),
            ));
        }
        if !self.user_repo.set_role(user_id, role).await? {
            return Err(AppError::NotFound);
        }
        info!(%user_id, %role, "User role updated");
        Ok(())
    }

    // ========================================================================
    // Quotes
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn list_quotes(&self) -> AppResult<Vec<QuoteWithOwner>> {
        self.quote_repo.list_with_owner().await
    }

    #[instrument(skip(self))]
    pub async fn delete_quote(&self, quote_id: Uuid) -> AppResult<()> {
        if !self.quote_repo.delete(quote_id).await? {
            return Err(AppError::NotFound);
        }
        info!(%quote_id, "Quote deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> AppResult<AdminStats> {
        let total_users = self.user_repo.count().await?;
        let totals = self.quote_repo.totals().await?;
        Ok(AdminStats {
            total_users,
            total_quotes: totals.count,
            total_revenue: format_cents(totals.revenue_cents),
        })
    }
}
