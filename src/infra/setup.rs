use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{http::app_state::AppState, identity::FirebaseIdentityVerifier},
    application::{
        ports::UniformQuotePricer,
        use_cases::{
            admin::AdminUseCases,
            event_type::{EventTypeRepo, EventTypeUseCases},
            quote::{QuoteRepo, QuoteUseCases},
            user::{UserRepo, UserUseCases},
        },
    },
    infra::{config::AppConfig, http_client, postgres_persistence},
};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let postgres_arc = Arc::new(postgres_persistence(&config).await?);
    let user_repo_arc = postgres_arc.clone() as Arc<dyn UserRepo>;
    let quote_repo_arc = postgres_arc.clone() as Arc<dyn QuoteRepo>;
    let event_type_repo_arc = postgres_arc.clone() as Arc<dyn EventTypeRepo>;

    let verifier = Arc::new(FirebaseIdentityVerifier::new(
        &config.firebase_project_id,
        config.firebase_jwks_url.clone(),
        http_client::try_build_client()?,
    ));

    let user_use_cases = UserUseCases::new(
        user_repo_arc.clone(),
        verifier,
        config.admin_email.clone(),
    );
    let quote_use_cases = QuoteUseCases::new(quote_repo_arc.clone(), Arc::new(UniformQuotePricer));
    let event_type_use_cases = EventTypeUseCases::new(event_type_repo_arc);
    let admin_use_cases = AdminUseCases::new(user_repo_arc, quote_repo_arc);

    Ok(AppState {
        config: Arc::new(config),
        user_use_cases: Arc::new(user_use_cases),
        quote_use_cases: Arc::new(quote_use_cases),
        event_type_use_cases: Arc::new(event_type_use_cases),
        admin_use_cases: Arc::new(admin_use_cases),
    })
}

pub fn init_tracing(log_file: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eventquote=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped if the file can't be opened
    let json_layer = match File::create(log_file) {
        Ok(file) => Some(
            fmt::layer()
                .json()
                .with_writer(Arc::new(file))
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        ),
        Err(err) => {
            eprintln!("cannot create log file {log_file}: {err}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
