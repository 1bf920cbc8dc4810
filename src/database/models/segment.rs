use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::id;

/// Stored segment document: a labeled time range within a project's media.
///
/// `duration` is derived state (end − start); the repository recomputes it on
/// every save so a client-supplied value can never persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    pub prosody: Option<String>,
    pub prosody2: Option<String>,
    pub description: Option<String>,
    /// Opaque annotation records; stored and returned in order, never
    /// interpreted by the backend.
    #[serde(default)]
    pub descriptions_prosody: Vec<Value>,
    pub project_id: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Segment {
    pub fn new(
        start_time: f64,
        end_time: f64,
        project_id: ObjectId,
        prosody: Option<String>,
        prosody2: Option<String>,
        description: Option<String>,
        descriptions_prosody: Vec<Value>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            start_time,
            end_time,
            duration: end_time - start_time,
            views: 0,
            likes: 0,
            prosody,
            prosody2,
            description,
            descriptions_prosody,
            project_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_response(&self) -> Value {
        json!({
            "_id": self.id.as_ref().map(id::render_object_id),
            "start_time": self.start_time,
            "end_time": self.end_time,
            "duration": self.duration,
            "views": self.views,
            "likes": self.likes,
            "prosody": self.prosody,
            "prosody2": self.prosody2,
            "description": self.description,
            "descriptions_prosody": self.descriptions_prosody,
            "project_id": id::render_object_id(&self.project_id),
            "created_at": self.created_at.to_rfc3339(),
            "updated_at": self.updated_at.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_derived_on_construction() {
        let segment = Segment::new(5.0, 10.0, ObjectId::new(), None, None, None, vec![]);
        assert_eq!(segment.duration, 5.0);
        assert_eq!(segment.views, 0);
        assert_eq!(segment.likes, 0);
    }

    #[test]
    fn storage_field_names_are_snake_case() {
        let segment = Segment::new(
            1.5,
            4.0,
            ObjectId::new(),
            Some("rising".into()),
            None,
            Some("intro".into()),
            vec![json!({"word": "hola", "tone": "flat"})],
        );
        let doc = bson::to_document(&segment).unwrap();
        assert_eq!(doc.get_f64("start_time").unwrap(), 1.5);
        assert_eq!(doc.get_f64("end_time").unwrap(), 4.0);
        assert_eq!(doc.get_f64("duration").unwrap(), 2.5);
        assert!(doc.get_object_id("project_id").is_ok());
        assert_eq!(doc.get_array("descriptions_prosody").unwrap().len(), 1);
        // API vocabulary never leaks into storage
        assert!(!doc.contains_key("startTime"));
        assert!(!doc.contains_key("projectid"));
    }

    #[test]
    fn response_renders_both_ids_as_strings() {
        let project_id = ObjectId::new();
        let mut segment = Segment::new(0.0, 2.0, project_id, None, None, None, vec![]);
        segment.id = Some(ObjectId::new());
        let response = segment.to_response();
        assert!(response["_id"].is_string());
        assert_eq!(response["project_id"], project_id.to_hex());
    }
}
