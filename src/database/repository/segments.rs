use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::database::id;
use crate::database::models::Segment;
use crate::database::DatabaseError;

const COLLECTION: &str = "segments";

pub struct SegmentRepository {
    collection: Collection<Segment>,
}

impl SegmentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// A malformed id resolves to `None`, same as an unassigned one.
    pub async fn find_by_id(&self, raw_id: &str) -> Result<Option<Segment>, DatabaseError> {
        let Some(oid) = id::parse_object_id(raw_id) else {
            return Ok(None);
        };
        Ok(self.collection.find_one(doc! { "_id": oid }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Segment>, DatabaseError> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut segments = Vec::new();
        while let Some(segment) = cursor.try_next().await? {
            segments.push(segment);
        }
        Ok(segments)
    }

    /// Segments belonging to a project. A malformed or unknown project id
    /// yields an empty list, never an error.
    pub async fn find_by_project(&self, raw_project_id: &str) -> Result<Vec<Segment>, DatabaseError> {
        let Some(project_oid) = id::parse_object_id(raw_project_id) else {
            return Ok(Vec::new());
        };
        let mut cursor = self
            .collection
            .find(doc! { "project_id": project_oid })
            .await?;
        let mut segments = Vec::new();
        while let Some(segment) = cursor.try_next().await? {
            segments.push(segment);
        }
        Ok(segments)
    }

    /// Insert when the record has no id yet, otherwise replace the stored
    /// document wholesale. Duration is recomputed here on every save; it is
    /// derived state and never taken from the caller as-is.
    pub async fn save(&self, segment: &mut Segment) -> Result<(), DatabaseError> {
        segment.duration = segment.end_time - segment.start_time;
        match segment.id {
            Some(oid) => {
                segment.updated_at = Utc::now();
                self.collection
                    .replace_one(doc! { "_id": oid }, &*segment)
                    .await?;
            }
            None => {
                let now = Utc::now();
                segment.created_at = now;
                segment.updated_at = now;
                let result = self.collection.insert_one(&*segment).await?;
                segment.id = result.inserted_id.as_object_id();
            }
        }
        Ok(())
    }

    /// Returns true iff a document was actually removed.
    pub async fn delete(&self, raw_id: &str) -> Result<bool, DatabaseError> {
        let Some(oid) = id::parse_object_id(raw_id) else {
            return Ok(false);
        };
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }

    /// Atomic `$inc` on the view counter, applied directly in the store so
    /// concurrent increments cannot lose updates. Returns whether an
    /// existing document was touched.
    pub async fn increment_views(&self, raw_id: &str) -> Result<bool, DatabaseError> {
        self.increment_counter(raw_id, "views").await
    }

    /// Atomic `$inc` on the like counter.
    pub async fn increment_likes(&self, raw_id: &str) -> Result<bool, DatabaseError> {
        self.increment_counter(raw_id, "likes").await
    }

    async fn increment_counter(&self, raw_id: &str, field: &str) -> Result<bool, DatabaseError> {
        let Some(oid) = id::parse_object_id(raw_id) else {
            return Ok(false);
        };
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$inc": { field: 1 } })
            .await?;
        Ok(result.modified_count > 0)
    }
}
