use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{
        admin::AdminUseCases, event_type::EventTypeUseCases, quote::QuoteUseCases,
        user::UserUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub user_use_cases: Arc<UserUseCases>,
    pub quote_use_cases: Arc<QuoteUseCases>,
    pub event_type_use_cases: Arc<EventTypeUseCases>,
    pub admin_use_cases: Arc<AdminUseCases>,
}
