use serde::{Deserialize, Serialize};

/// One employee extracted from the time-clock export. The id is the natural
/// key from the source "Employee Id" column, not an auto-increment.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
}
