use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::{IdentityVerifier, VerifiedIdentity},
};

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Refetches are spaced at least this far apart.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Keys older than this are refetched before use, so rotated-out keys expire.
const KEY_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: Option<String>,
    kty: String,
    n: Option<String>,
    e: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

/// RSA components of one signing key. `DecodingKey` is rebuilt per call.
#[derive(Debug, Clone)]
struct RsaComponents {
    n: String,
    e: String,
}

#[derive(Default)]
struct KeyCache {
    keys: HashMap<String, RsaComponents>,
    last_refresh: Option<Instant>,
    last_refresh_attempt: Option<Instant>,
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
}

/// Verifies Firebase ID tokens (RS256) against Google's published signing keys.
pub struct FirebaseIdentityVerifier {
    issuer: String,
    audience: String,
    jwks_url: Url,
    client: reqwest::Client,
    key_ttl: Duration,
    cache: RwLock<KeyCache>,
    refresh_lock: Mutex<()>,
}

impl FirebaseIdentityVerifier {
    /// `client` should carry timeouts (see `infra::http_client`): a refresh
    /// holds the refresh lock for the whole fetch.
    pub fn new(project_id: &str, jwks_url: Url, client: reqwest::Client) -> Self {
        Self {
            issuer: format!("{ISSUER_PREFIX}{project_id}"),
            audience: project_id.to_string(),
            jwks_url,
            client,
            key_ttl: KEY_CACHE_TTL,
            cache: RwLock::new(KeyCache::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    async fn decoding_key(&self, kid: &str) -> AppResult<DecodingKey> {
        {
            let cache = self.cache.read().await;
            let fresh = !is_stale(cache.last_refresh, self.key_ttl);
            if let Some(key) = cache.keys.get(kid).filter(|_| fresh) {
                return to_decoding_key(key);
            }
        }

        self.refresh().await?;

        let cache = self.cache.read().await;
        let key = cache.keys.get(kid).ok_or_else(|| {
            debug!(kid, "Unknown signing key id");
            AppError::InvalidCredentials
        })?;
        to_decoding_key(key)
    }

    async fn refresh(&self) -> AppResult<()> {
        let _guard = self.refresh_lock.lock().await;

        {
            let cache = self.cache.read().await;
            if !can_attempt(cache.last_refresh_attempt, MIN_REFRESH_INTERVAL) {
                return Ok(());
            }
        }
        self.cache.write().await.last_refresh_attempt = Some(Instant::now());

        let jwks: JwksResponse = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::Internal(format!("JWKS fetch failed: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("JWKS parse failed: {e}")))?;

        let keys: HashMap<String, RsaComponents> = jwks
            .keys
            .into_iter()
            .filter(|jwk| jwk.kty == "RSA")
            .filter_map(|jwk| match (jwk.kid, jwk.n, jwk.e) {
                (Some(kid), Some(n), Some(e)) => Some((kid, RsaComponents { n, e })),
                _ => None,
            })
            .collect();

        info!(count = keys.len(), "Refreshed identity provider signing keys");
        let mut cache = self.cache.write().await;
        cache.keys = keys;
        cache.last_refresh = Some(Instant::now());
        Ok(())
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
    async fn verify(&self, credential: &str) -> AppResult<VerifiedIdentity> {
        let header = decode_header(credential).map_err(|e| {
            debug!(error = %e, "Malformed token header");
            AppError::InvalidCredentials
        })?;

        if header.alg != Algorithm::RS256 {
            debug!(alg = ?header.alg, "Disallowed token algorithm");
            return Err(AppError::InvalidCredentials);
        }
        let kid = header.kid.ok_or_else(|| {
            debug!("Token header missing kid");
            AppError::InvalidCredentials
        })?;

        let key = self.decoding_key(&kid).await?;
        let token = decode::<FirebaseClaims>(credential, &key, &self.validation()).map_err(|e| {
            warn!(error = %e, "Token validation failed");
            AppError::InvalidCredentials
        })?;

        identity_from_claims(token.claims)
    }
}

fn identity_from_claims(claims: FirebaseClaims) -> AppResult<VerifiedIdentity> {
    let email = claims
        .email
        .filter(|email| !email.trim().is_empty())
        .ok_or(AppError::InvalidCredentials)?;
    if claims.sub.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    Ok(VerifiedIdentity {
        external_subject_id: claims.sub,
        email,
    })
}

fn to_decoding_key(key: &RsaComponents) -> AppResult<DecodingKey> {
    DecodingKey::from_rsa_components(&key.n, &key.e)
        .map_err(|e| AppError::Internal(format!("Bad RSA signing key: {e}")))
}

fn is_stale(last_refresh: Option<Instant>, ttl: Duration) -> bool {
    match last_refresh {
        None => true,
        Some(ts) => ts.elapsed() >= ttl,
    }
}

fn can_attempt(last_attempt: Option<Instant>, min_interval: Duration) -> bool {
    match last_attempt {
        None => true,
        Some(ts) => ts.elapsed() >= min_interval,
    }
}
