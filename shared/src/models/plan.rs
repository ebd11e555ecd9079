//! Membership Plan Model

use serde::{Deserialize, Serialize};

/// Plan entity — a purchasable membership tier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub duration_months: i64,
    pub price: f64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create plan payload
#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
pub struct PlanCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "duration_months must be at least 1"))]
    pub duration_months: i64,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Update plan payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub duration_months: Option<i64>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
