use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

pub const DEFAULT_FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

pub struct AppConfig {
    pub database_url: SecretString,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Firebase project id. Expected `aud` of every ID token.
    pub firebase_project_id: String,
    pub firebase_jwks_url: Url,
    /// Users provisioned with exactly this email get the admin role.
    pub admin_email: String,
    pub log_file: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url: SecretString = SecretString::new(get_env::<String>("DATABASE_URL").into());
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 10);

        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 5000)));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:5173"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let firebase_project_id: String = get_env("FIREBASE_PROJECT_ID");
        let firebase_jwks_url: Url =
            get_env_default("FIREBASE_JWKS_URL", DEFAULT_FIREBASE_JWKS_URL.to_string())
                .parse()
                .expect("FIREBASE_JWKS_URL must be a valid URL");

        let admin_email: String =
            get_env_default("ADMIN_EMAIL", "admin@example.com".to_string());
        let log_file: String = get_env_default("LOG_FILE", "app.log".to_string());

        Self {
            database_url,
            db_max_connections,
            bind_addr,
            cors_origin,
            firebase_project_id,
            firebase_jwks_url,
            admin_email,
            log_file,
        }
    }
}
