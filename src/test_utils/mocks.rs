//! In-memory adapters standing in for Postgres and the identity provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::{IdentityVerifier, QuotePricer, VerifiedIdentity},
        use_cases::{
            event_type::EventTypeRepo,
            quote::{NewQuote, QuoteRepo, QuoteTotals},
            user::{NewUser, UserRepo},
        },
    },
    domain::entities::{
        event_type::EventType,
        quote::{Quote, QuoteWithOwner},
        user::{User, UserRole},
    },
    test_utils::test_credential,
};

// ============================================================================
// InMemoryDatastore
// ============================================================================

/// In-memory implementation of every repository trait, mirroring the
/// Postgres schema: unique subject ids, unique event-type names, quotes
/// cascading with their owner. Rows are kept in insertion order.
#[derive(Default)]
pub struct InMemoryDatastore {
    users: Mutex<Vec<User>>,
    quotes: Mutex<Vec<Quote>>,
    event_types: Mutex<Vec<EventType>>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    pub fn insert_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn insert_quote(&self, quote: Quote) {
        self.quotes.lock().unwrap().push(quote);
    }

    pub fn insert_event_type(&self, event_type: EventType) {
        self.event_types.lock().unwrap().push(event_type);
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn quote_count(&self) -> usize {
        self.quotes.lock().unwrap().len()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepo for InMemoryDatastore {
    async fn find_by_subject(&self, external_subject_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.external_subject_id == external_subject_id)
            .cloned())
    }

    async fn insert_if_absent(&self, new_user: &NewUser) -> AppResult<bool> {
        // Check and insert under one lock, like ON CONFLICT DO NOTHING.
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.external_subject_id == new_user.external_subject_id)
        {
            return Ok(false);
        }

        let now = chrono::Utc::now().naive_utc();
        users.push(User {
            id: Uuid::new_v4(),
            external_subject_id: new_user.external_subject_id.clone(),
            email: new_user.email.clone(),
            first_name: String::new(),
            last_name: String::new(),
            role: new_user.role,
            created_at: Some(now),
            updated_at: Some(now),
        });
        Ok(true)
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn update_name(
        &self,
        user_id: Uuid,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(false);
        };
        user.first_name = first_name.to_string();
        user.last_name = last_name.to_string();
        user.updated_at = Some(chrono::Utc::now().naive_utc());
        Ok(true)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn set_role(&self, user_id: Uuid, role: UserRole) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(false);
        };
        user.role = role;
        user.updated_at = Some(chrono::Utc::now().naive_utc());
        Ok(true)
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let removed = {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != user_id);
            users.len() != before
        };
        if removed {
            self.quotes.lock().unwrap().retain(|q| q.user_id != user_id);
        }
        Ok(removed)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl QuoteRepo for InMemoryDatastore {
    async fn create(&self, new_quote: &NewQuote) -> AppResult<Quote> {
        let owner_exists = self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.id == new_quote.user_id);
        if !owner_exists {
            return Err(AppError::InvalidInput("Referenced record not found".into()));
        }

        let quote = Quote {
            id: Uuid::new_v4(),
            user_id: new_quote.user_id,
            event_type: new_quote.event_type.clone(),
            event_date: new_quote.event_date,
            location: new_quote.location.clone(),
            attendees: new_quote.attendees,
            quote_amount_cents: new_quote.quote_amount_cents,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.quotes.lock().unwrap().push(quote.clone());
        Ok(quote)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Quote>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_with_owner(&self) -> AppResult<Vec<QuoteWithOwner>> {
        let emails: HashMap<Uuid, String> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|u| (u.id, u.email.clone()))
            .collect();

        Ok(self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter_map(|q| {
                emails.get(&q.user_id).map(|email| QuoteWithOwner {
                    quote: q.clone(),
                    email: email.clone(),
                })
            })
            .collect())
    }

    async fn delete(&self, quote_id: Uuid) -> AppResult<bool> {
        let mut quotes = self.quotes.lock().unwrap();
        let before = quotes.len();
        quotes.retain(|q| q.id != quote_id);
        Ok(quotes.len() != before)
    }

    async fn totals(&self) -> AppResult<QuoteTotals> {
        let quotes = self.quotes.lock().unwrap();
        Ok(QuoteTotals {
            count: quotes.len() as i64,
            revenue_cents: quotes.iter().map(|q| q.quote_amount_cents).sum(),
        })
    }
}

#[async_trait]
impl EventTypeRepo for InMemoryDatastore {
    async fn list(&self) -> AppResult<Vec<EventType>> {
        let mut types = self.event_types.lock().unwrap().clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn create(&self, name: &str) -> AppResult<EventType> {
        let mut types = self.event_types.lock().unwrap();
        if types.iter().any(|t| t.name == name) {
            return Err(AppError::InvalidInput(
                "A record with this value already exists".into(),
            ));
        }
        let event_type = EventType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Some(chrono::Utc::now().naive_utc()),
        };
        types.push(event_type.clone());
        Ok(event_type)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut types = self.event_types.lock().unwrap();
        let before = types.len();
        types.retain(|t| t.id != id);
        Ok(types.len() != before)
    }
}

// ============================================================================
// StubIdentityVerifier
// ============================================================================

/// Identity verifier backed by a fixed credential table. Counts calls so
/// tests can assert the length pre-filter short-circuits.
#[derive(Default)]
pub struct StubIdentityVerifier {
    identities: Mutex<HashMap<String, VerifiedIdentity>>,
    calls: AtomicUsize,
}

impl StubIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `test_credential(subject)` as proof of `subject`/`email`.
    pub fn register(&self, subject: &str, email: &str) {
        self.identities.lock().unwrap().insert(
            test_credential(subject),
            VerifiedIdentity {
                external_subject_id: subject.to_string(),
                email: email.to_string(),
            },
        );
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityVerifier for StubIdentityVerifier {
    async fn verify(&self, credential: &str) -> AppResult<VerifiedIdentity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.identities
            .lock()
            .unwrap()
            .get(credential)
            .cloned()
            .ok_or(AppError::InvalidCredentials)
    }
}

// ============================================================================
// FixedQuotePricer
// ============================================================================

/// Always prices at the given number of cents.
pub struct FixedQuotePricer(pub i64);

impl QuotePricer for FixedQuotePricer {
    fn price_cents(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_quote, create_test_user};

    #[tokio::test]
    async fn insert_if_absent_ignores_duplicates() {
        let store = InMemoryDatastore::new();
        let new_user = NewUser {
            external_subject_id: "uid".to_string(),
            email: "a@b.com".to_string(),
            role: UserRole::Member,
        };

        assert!(store.insert_if_absent(&new_user).await.unwrap());
        assert!(!store.insert_if_absent(&new_user).await.unwrap());
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn quote_for_missing_owner_is_rejected() {
        let store = InMemoryDatastore::new();
        let quote = create_test_quote(Uuid::new_v4(), |_| {});

        let result = QuoteRepo::create(
            &store,
            &NewQuote {
                user_id: quote.user_id,
                event_type: quote.event_type,
                event_date: quote.event_date,
                location: quote.location,
                attendees: quote.attendees,
                quote_amount_cents: quote.quote_amount_cents,
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn stub_verifier_counts_calls() {
        let verifier = StubIdentityVerifier::new();
        verifier.register("uid", "a@b.com");

        let ok = verifier.verify(&test_credential("uid")).await.unwrap();
        let err = verifier.verify("nope").await;

        assert_eq!(ok.email, "a@b.com");
        assert!(err.is_err());
        assert_eq!(verifier.calls(), 2);
    }

    #[tokio::test]
    async fn user_delete_cascades_in_memory() {
        let user = create_test_user(|_| {});
        let store = InMemoryDatastore::with_users(vec![user.clone()]);
        store.insert_quote(create_test_quote(user.id, |_| {}));

        assert!(UserRepo::delete(&store, user.id).await.unwrap());
        assert_eq!(store.quote_count(), 0);
    }
}
