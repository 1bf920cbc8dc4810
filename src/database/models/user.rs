use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::id;

/// Stored user document.
///
/// The serde field names here are the storage schema; nothing outside the
/// database layer may depend on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    // Stored as-is; comparison strategy lives behind auth::PasswordVerifier
    pub password: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            username,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Response shape: id rendered as a string, password omitted.
    pub fn to_response(&self) -> Value {
        json!({
            "_id": self.id.as_ref().map(id::render_object_id),
            "username": self.username,
            "email": self.email,
            "created_at": self.created_at.to_rfc3339(),
            "updated_at": self.updated_at.to_rfc3339(),
        })
    }
}
