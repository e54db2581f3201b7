//! Pizza model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    pub ingredients: String,
}
