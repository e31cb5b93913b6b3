//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::{
    application::use_cases::user::MIN_CREDENTIAL_LEN,
    domain::entities::{
        event_type::EventType,
        quote::Quote,
        user::{User, UserRole},
    },
};

/// Build a bearer credential for `subject` that passes the length pre-filter.
/// Pair it with `StubIdentityVerifier::register`.
pub fn test_credential(subject: &str) -> String {
    format!("test-credential.{}.{}", subject, "x".repeat(MIN_CREDENTIAL_LEN))
}

/// Create a test user with sensible defaults. The subject id is unique per call.
pub fn create_test_user(overrides: impl FnOnce(&mut User)) -> User {
    let id = Uuid::new_v4();
    let mut user = User {
        id,
        external_subject_id: format!("subject-{}", id.simple()),
        email: format!("{}@example.test", id.simple()),
        first_name: String::new(),
        last_name: String::new(),
        role: UserRole::Member,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut user);
    user
}

/// Create a test quote owned by `user_id`.
pub fn create_test_quote(user_id: Uuid, overrides: impl FnOnce(&mut Quote)) -> Quote {
    let mut quote = Quote {
        id: Uuid::new_v4(),
        user_id,
        event_type: "Wedding".to_string(),
        event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        location: "Austin".to_string(),
        attendees: 150,
        quote_amount_cents: 42_000,
        created_at: test_datetime(),
    };
    overrides(&mut quote);
    quote
}

pub fn create_test_event_type(name: &str) -> EventType {
    EventType {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: Some(test_datetime()),
    }
}

/// Fixed timestamp for reproducible fixtures.
pub fn test_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_passes_prefilter() {
        assert!(test_credential("a").len() >= MIN_CREDENTIAL_LEN);
        assert_ne!(test_credential("a"), test_credential("b"));
    }

    #[test]
    fn test_users_have_distinct_subjects() {
        let a = create_test_user(|_| {});
        let b = create_test_user(|_| {});
        assert_ne!(a.external_subject_id, b.external_subject_id);
        assert_ne!(a.id, b.id);
    }
}
