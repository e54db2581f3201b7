//! Restaurant model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A restaurant. Rows are seeded; the API only reads and deletes them.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
}
