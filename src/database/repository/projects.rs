use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::database::id;
use crate::database::models::Project;
use crate::database::DatabaseError;

const COLLECTION: &str = "projects";

pub struct ProjectRepository {
    collection: Collection<Project>,
}

impl ProjectRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// A malformed id resolves to `None`, same as an unassigned one.
    pub async fn find_by_id(&self, raw_id: &str) -> Result<Option<Project>, DatabaseError> {
        let Some(oid) = id::parse_object_id(raw_id) else {
            return Ok(None);
        };
        Ok(self.collection.find_one(doc! { "_id": oid }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Project>, DatabaseError> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut projects = Vec::new();
        while let Some(project) = cursor.try_next().await? {
            projects.push(project);
        }
        Ok(projects)
    }

    /// Insert when the record has no id yet, otherwise replace the stored
    /// document wholesale.
    pub async fn save(&self, project: &mut Project) -> Result<(), DatabaseError> {
        match project.id {
            Some(oid) => {
                project.updated_at = Utc::now();
                self.collection
                    .replace_one(doc! { "_id": oid }, &*project)
                    .await?;
            }
            None => {
                let now = Utc::now();
                project.created_at = now;
                project.updated_at = now;
                let result = self.collection.insert_one(&*project).await?;
                project.id = result.inserted_id.as_object_id();
            }
        }
        Ok(())
    }

    /// Returns true iff a document was actually removed. Segments that
    /// reference the project are left in place.
    pub async fn delete(&self, raw_id: &str) -> Result<bool, DatabaseError> {
        let Some(oid) = id::parse_object_id(raw_id) else {
            return Ok(false);
        };
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }
}
