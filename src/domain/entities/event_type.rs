use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventType {
    pub id: Uuid,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}
