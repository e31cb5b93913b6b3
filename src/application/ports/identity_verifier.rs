use async_trait::async_trait;

use crate::app_error::AppResult;

/// Identity proven by a bearer credential. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub external_subject_id: String,
    pub email: String,
}

/// External identity provider. Any `Err` means "unauthenticated" to callers,
/// whatever the underlying reason.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> AppResult<VerifiedIdentity>;
}
