mod firebase;

pub use firebase::FirebaseIdentityVerifier;
