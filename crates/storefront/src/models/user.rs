//! Registered customers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sakaya_core::{Email, UserId};

/// A customer account. Email addresses are unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
