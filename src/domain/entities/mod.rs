pub mod event_type;
pub mod quote;
pub mod user;
