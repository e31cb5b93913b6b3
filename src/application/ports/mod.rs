pub mod identity_verifier;
pub mod quote_pricer;

pub use identity_verifier::{IdentityVerifier, VerifiedIdentity};
pub use quote_pricer::{QuotePricer, UniformQuotePricer};
