use bson::oid::ObjectId;
use std::sync::Arc;

use crate::db::location_store::LocationStore;
use crate::error::LocationError;
use crate::models::location::{GeoNearOptions, GeoPoint};
use crate::models::location_form::{DistanceQuery, LocationDraft, LocationForm};
use crate::models::location_response::{LocationResponse, RankedLocation};
use crate::services::geo::km_to_m;

/// Most results a distance query returns.
pub const GEO_NEAR_LIMIT: i64 = 10;

const MISSING_DISTANCE_PARAMS: &str = "lng, lat, and maxDistance query parameters are required";
const LOCATION_NOT_FOUND: &str = "locationid not found";

/// The location directory: one store round trip per operation (two for update).
#[derive(Clone)]
pub struct LocationService {
    store: Arc<dyn LocationStore>,
}

impl LocationService {
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    pub async fn list_by_distance(
        &self,
        query: &DistanceQuery,
    ) -> Result<Vec<RankedLocation>, LocationError> {
        let (lng, lat, max_distance) = query
            .coordinates()
            .ok_or(LocationError::MissingParameter(MISSING_DISTANCE_PARAMS))?;

        // Spherical queries measure in meters, the API in kilometers.
        let options = GeoNearOptions {
            spherical: true,
            max_distance: km_to_m(max_distance),
            limit: GEO_NEAR_LIMIT,
        };
        let matches = self.store.geo_near(GeoPoint::new(lng, lat), options).await?;

        Ok(matches.into_iter().map(RankedLocation::from).collect())
    }

    pub async fn create(&self, form: LocationForm) -> Result<LocationResponse, LocationError> {
        let draft = LocationDraft::try_from(form).map_err(LocationError::InvalidPayload)?;

        let location = self
            .store
            .create(draft.into_new_location())
            .await
            .map_err(LocationError::CreateFailed)?;

        log::info!("Created location {:?}", location.id);
        Ok(location.into())
    }

    pub async fn read_one(&self, id: Option<&str>) -> Result<LocationResponse, LocationError> {
        let id = id.ok_or(LocationError::MissingParameter("No locationid in request"))?;
        let id = parse_id(id)?;

        match self.store.find_by_id(&id).await? {
            Some(location) => Ok(location.into()),
            None => Err(LocationError::NotFound(LOCATION_NOT_FOUND)),
        }
    }

    /// Overwrites every editable field. The save is a conditional write on
    /// `_id`, so a record deleted after the fetch is reported as not found
    /// rather than resurrected.
    pub async fn update_one(
        &self,
        id: Option<&str>,
        form: LocationForm,
    ) -> Result<LocationResponse, LocationError> {
        let id = id.ok_or(LocationError::MissingParameter(
            "Not found, locationid is required",
        ))?;
        let id = parse_id(id)?;

        let mut location = self
            .store
            .find_editable_by_id(&id)
            .await?
            .ok_or(LocationError::NotFound(LOCATION_NOT_FOUND))?;

        LocationDraft::try_from(form)
            .map_err(LocationError::InvalidPayload)?
            .apply_to(&mut location);

        match self.store.save(&location).await? {
            Some(saved) => Ok(saved.into()),
            None => Err(LocationError::NotFound(LOCATION_NOT_FOUND)),
        }
    }

    /// Succeeds whether or not a record was removed.
    pub async fn delete_one(&self, id: Option<&str>) -> Result<(), LocationError> {
        let id = id.ok_or(LocationError::MissingParameter("No locationid"))?;
        let id = parse_id(id)?;

        if self.store.delete_by_id(&id).await? {
            log::info!("Deleted location {}", id);
        }
        Ok(())
    }
}

/// A string that is not an ObjectId can never name a stored location.
fn parse_id(id: &str) -> Result<ObjectId, LocationError> {
    ObjectId::parse_str(id).map_err(|_| LocationError::NotFound(LOCATION_NOT_FOUND))
}
