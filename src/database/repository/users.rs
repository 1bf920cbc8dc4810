use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::database::id;
use crate::database::models::User;
use crate::database::DatabaseError;

const COLLECTION: &str = "users";

/// Access to the `users` collection.
///
/// Lookups by email and username are exact-match under the store's default
/// collation; no normalization is applied.
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// A malformed id resolves to `None`, same as an unassigned one.
    pub async fn find_by_id(&self, raw_id: &str) -> Result<Option<User>, DatabaseError> {
        let Some(oid) = id::parse_object_id(raw_id) else {
            return Ok(None);
        };
        Ok(self.collection.find_one(doc! { "_id": oid }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, DatabaseError> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut users = Vec::new();
        while let Some(user) = cursor.try_next().await? {
            users.push(user);
        }
        Ok(users)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.collection.find_one(doc! { "username": username }).await?)
    }

    /// Insert when the record has no id yet, otherwise replace the stored
    /// document wholesale. The record's id and timestamps are updated in
    /// place so the caller holds the persisted state afterwards.
    pub async fn save(&self, user: &mut User) -> Result<(), DatabaseError> {
        match user.id {
            Some(oid) => {
                user.updated_at = Utc::now();
                self.collection
                    .replace_one(doc! { "_id": oid }, &*user)
                    .await?;
            }
            None => {
                let now = Utc::now();
                user.created_at = now;
                user.updated_at = now;
                let result = self.collection.insert_one(&*user).await?;
                user.id = result.inserted_id.as_object_id();
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
}
