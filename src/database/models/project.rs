use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::id;

/// Stored project document: a video reference plus an optional audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub video: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(video: String, audio: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            video,
            audio,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_response(&self) -> Value {
        json!({
            "_id": self.id.as_ref().map(id::render_object_id),
            "video": self.video,
            "audio": self.audio,
            "created_at": self.created_at.to_rfc3339(),
            "updated_at": self.updated_at.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_is_absent_from_storage_when_unset() {
        let project = Project::new("http://a/v.mp4".into(), None);
        let doc = bson::to_document(&project).unwrap();
        assert_eq!(doc.get_str("video").unwrap(), "http://a/v.mp4");
        assert!(!doc.contains_key("audio"));
    }

    #[test]
    fn response_renders_id_as_string() {
        let mut project = Project::new("http://a/v.mp4".into(), Some("http://a/a.mp3".into()));
        project.id = Some(ObjectId::new());
        let response = project.to_response();
        assert!(response["_id"].is_string());
        assert_eq!(response["audio"], "http://a/a.mp3");
    }
}
