use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::{
    options::{FindOneAndUpdateOptions, FindOneOptions, ReturnDocument},
    Collection,
};
use thiserror::Error;

use crate::models::location::{GeoNearMatch, GeoNearOptions, GeoPoint, Location};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("failed to decode location: {0}")]
    Decode(#[from] bson::de::Error),
    #[error("failed to encode location: {0}")]
    Encode(#[from] bson::ser::Error),
    #[error("{0}")]
    Unexpected(String),
}

/// Persistence for [`Location`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Locations within `options.max_distance` of `point`, nearest first.
    async fn geo_near(
        &self,
        point: GeoPoint,
        options: GeoNearOptions,
    ) -> Result<Vec<GeoNearMatch>, StoreError>;

    /// Inserts `location` and returns it with its new `_id`.
    async fn create(&self, location: Location) -> Result<Location, StoreError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Location>, StoreError>;

    /// Like [`find_by_id`](Self::find_by_id) with `rating` and `reviews` projected out.
    async fn find_editable_by_id(&self, id: &ObjectId) -> Result<Option<Location>, StoreError>;

    /// Persists the editable fields of `location`. `None` if the record no
    /// longer exists.
    async fn save(&self, location: &Location) -> Result<Option<Location>, StoreError>;

    /// Removes the record. `false` if there was nothing to remove.
    async fn delete_by_id(&self, id: &ObjectId) -> Result<bool, StoreError>;
}

fn editable_projection() -> Document {
    doc! { "rating": 0, "reviews": 0 }
}

#[derive(Clone)]
pub struct MongoLocationStore {
    collection: Collection<Location>,
}

impl MongoLocationStore {
    pub fn new(collection: Collection<Location>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl LocationStore for MongoLocationStore {
    async fn geo_near(
        &self,
        point: GeoPoint,
        options: GeoNearOptions,
    ) -> Result<Vec<GeoNearMatch>, StoreError> {
        let pipeline = vec![
            doc! {
                "$geoNear": {
                    "near": bson::to_bson(&point)?,
                    "distanceField": "dis",
                    "spherical": options.spherical,
                    "maxDistance": options.max_distance,
                }
            },
            doc! { "$limit": options.limit },
            doc! { "$project": { "_id": 0, "dis": 1, "obj": "$$ROOT" } },
        ];

        let documents: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(|document| bson::from_document(document).map_err(StoreError::from))
            .collect()
    }

    async fn create(&self, mut location: Location) -> Result<Location, StoreError> {
        let inserted = self.collection.insert_one(&location).await?;
        let id = inserted.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Unexpected(format!(
                "inserted id {} is not an ObjectId",
                inserted.inserted_id
            ))
        })?;
        location.id = Some(id);
        Ok(location)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Location>, StoreError> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_editable_by_id(&self, id: &ObjectId) -> Result<Option<Location>, StoreError> {
        let options = FindOneOptions::builder()
            .projection(editable_projection())
            .build();
        Ok(self
            .collection
            .find_one(doc! { "_id": *id })
            .with_options(options)
            .await?)
    }

    async fn save(&self, location: &Location) -> Result<Option<Location>, StoreError> {
        let id = location
            .id
            .ok_or_else(|| StoreError::Unexpected("cannot save a location without _id".into()))?;

        // $set keeps rating and reviews out of the write.
        let update = doc! {
            "$set": {
                "name": location.name.clone(),
                "address": location.address.clone(),
                "facilities": location.facilities.clone(),
                "coords": [location.lng(), location.lat()],
                "openingTimes": bson::to_bson(&location.opening_times)?,
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .projection(editable_projection())
            .build();

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .with_options(options)
            .await?)
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let deleted = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(deleted.deleted_count > 0)
    }
}
