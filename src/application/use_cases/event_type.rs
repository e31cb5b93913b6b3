use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::validators::require_present,
    domain::entities::event_type::EventType,
};

#[async_trait]
pub trait EventTypeRepo: Send + Sync {
    /// Sorted by name.
    async fn list(&self) -> AppResult<Vec<EventType>>;
    async fn create(&self, name: &str) -> AppResult<EventType>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Event-type taxonomy. Listing is public; mutation is admin-only at the
/// HTTP layer.
#[derive(Clone)]
pub struct EventTypeUseCases {
    repo: Arc<dyn EventTypeRepo>,
}

impl EventTypeUseCases {
    pub fn new(repo: Arc<dyn EventTypeRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<EventType>> {
        self.repo.list().await
    }

    /// Names are unique; a duplicate surfaces as `InvalidInput` from the store.
    #[instrument(skip(self))]
    pub async fn create(&self, name: Option<&str>) -> AppResult<EventType> {
        let name = require_present(name, "Name is required")?;
        let event_type = self.repo.create(&name).await?;
        info!(event_type_id = %event_type.id, name = %event_type.name, "Event type added");
        Ok(event_type)
    }

    /// Quotes reference event types by name, so existing quotes are untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
