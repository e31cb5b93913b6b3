use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::{IdentityVerifier, VerifiedIdentity},
        validators::present,
    },
    domain::entities::user::{User, UserRole},
};

/// Credentials shorter than this never reach the identity verifier. This is a
/// cheap pre-filter only; the verifier remains the sole authority.
pub const MIN_CREDENTIAL_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub external_subject_id: String,
    pub email: String,
    pub role: UserRole,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_subject(&self, external_subject_id: &str) -> AppResult<Option<User>>;
    /// Atomic conditional insert keyed on the subject id. Returns whether a row
    /// was created; `false` means another request provisioned it first.
    async fn insert_if_absent(&self, new_user: &NewUser) -> AppResult<bool>;
    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;
    async fn update_name(&self, user_id: Uuid, first_name: &str, last_name: &str)
    -> AppResult<bool>;
    async fn list_all(&self) -> AppResult<Vec<User>>;
    async fn set_role(&self, user_id: Uuid, role: UserRole) -> AppResult<bool>;
    async fn delete(&self, user_id: Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<i64>;
}

/// User directory plus the authentication half of the access gate.
#[derive(Clone)]
pub struct UserUseCases {
    repo: Arc<dyn UserRepo>,
    verifier: Arc<dyn IdentityVerifier>,
    admin_email: String,
}

impl UserUseCases {
    pub fn new(
        repo: Arc<dyn UserRepo>,
        verifier: Arc<dyn IdentityVerifier>,
        admin_email: String,
    ) -> Self {
        Self {
            repo,
            verifier,
            admin_email,
        }
    }

    /// Verify a bearer credential and resolve (or provision) its user.
    ///
    /// Every verification failure becomes `InvalidCredentials`. Datastore
    /// failures while resolving are passed through untouched.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, credential: &str) -> AppResult<User> {
        if credential.len() < MIN_CREDENTIAL_LEN {
            debug!(len = credential.len(), "Credential below minimum length");
            return Err(AppError::InvalidCredentials);
        }

        let identity = self.verifier.verify(credential).await.map_err(|err| {
            warn!(error = %err, "Credential rejected by identity verifier");
            AppError::InvalidCredentials
        })?;

        self.resolve_user(&identity).await
    }

    /// Lookup-or-create by subject id. Safe under concurrent first requests:
    /// the insert is conditional in the store, and the result is always
    /// re-read so callers see persisted state.
    #[instrument(skip(self, identity), fields(subject = %identity.external_subject_id))]
    pub async fn resolve_user(&self, identity: &VerifiedIdentity) -> AppResult<User> {
        if let Some(user) = self
            .repo
            .find_by_subject(&identity.external_subject_id)
            .await?
        {
            return Ok(user);
        }

        let new_user = NewUser {
            external_subject_id: identity.external_subject_id.clone(),
            email: identity.email.clone(),
            role: UserRole::for_new_user(&identity.email, &self.admin_email),
        };
        let inserted = self.repo.insert_if_absent(&new_user).await?;

        let user = self
            .repo
            .find_by_subject(&identity.external_subject_id)
            .await?
            .ok_or_else(|| AppError::Internal("user missing after provisioning".into()))?;

        if inserted {
            info!(user_id = %user.id, role = %user.role, "Provisioned new user");
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<User> {
        self.repo
            .get_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AppResult<()> {
        let (Some(first_name), Some(last_name)) = (present(first_name), present(last_name)) else {
            return Err(AppError::InvalidInput(
                "first_name and last_name are required".into(),
            ));
        };

        let updated = self
            .repo
            .update_name(user_id, first_name, last_name)
            .await?;
        if !updated {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
