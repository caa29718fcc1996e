#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use loc8r_api::db::location_store::{LocationStore, StoreError};
use loc8r_api::models::location::{GeoNearMatch, GeoNearOptions, GeoPoint, Location, Review};
use loc8r_api::routes;
use loc8r_api::services::geo::{great_circle_distance_km, km_to_m};
use loc8r_api::services::location_service::LocationService;

/// Store kept in memory, measuring geo-near distances with the haversine
/// formula.
#[derive(Default)]
pub struct InMemoryLocationStore {
    locations: RwLock<Vec<Location>>,
    failure: Option<String>,
}

impl InMemoryLocationStore {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub async fn insert(&self, mut location: Location) -> ObjectId {
        let id = ObjectId::new();
        location.id = Some(id);
        self.locations.write().await.push(location);
        id
    }

    pub async fn get(&self, id: ObjectId) -> Option<Location> {
        self.locations
            .read()
            .await
            .iter()
            .find(|location| location.id == Some(id))
            .cloned()
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Unexpected(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn geo_near(
        &self,
        point: GeoPoint,
        options: GeoNearOptions,
    ) -> Result<Vec<GeoNearMatch>, StoreError> {
        self.check()?;
        let centre = [point.lng(), point.lat()];

        let mut matches: Vec<GeoNearMatch> = self
            .locations
            .read()
            .await
            .iter()
            .map(|location| GeoNearMatch {
                dis: km_to_m(great_circle_distance_km(centre, location.coords)),
                obj: location.clone(),
            })
            .filter(|hit| hit.dis <= options.max_distance)
            .collect();
        matches.sort_by(|a, b| a.dis.total_cmp(&b.dis));
        matches.truncate(options.limit as usize);
        Ok(matches)
    }

    async fn create(&self, location: Location) -> Result<Location, StoreError> {
        self.check()?;
        let id = self.insert(location).await;
        self.get(id)
            .await
            .ok_or_else(|| StoreError::Unexpected("insert lost".to_string()))
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Location>, StoreError> {
        self.check()?;
        Ok(self.get(*id).await)
    }

    async fn find_editable_by_id(&self, id: &ObjectId) -> Result<Option<Location>, StoreError> {
        self.check()?;
        Ok(self.get(*id).await.map(|location| location.without_reviews()))
    }

    async fn save(&self, location: &Location) -> Result<Option<Location>, StoreError> {
        self.check()?;
        let mut locations = self.locations.write().await;
        let Some(stored) = locations.iter_mut().find(|stored| stored.id == location.id) else {
            return Ok(None);
        };

        stored.name = location.name.clone();
        stored.address = location.address.clone();
        stored.facilities = location.facilities.clone();
        stored.coords = location.coords;
        stored.opening_times = location.opening_times.clone();
        Ok(Some(stored.without_reviews()))
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<bool, StoreError> {
        self.check()?;
        let mut locations = self.locations.write().await;
        let before = locations.len();
        locations.retain(|location| location.id != Some(*id));
        Ok(locations.len() < before)
    }
}

pub struct TestApp {
    pub store: Arc<InMemoryLocationStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(InMemoryLocationStore::default())
    }

    pub fn with_store(store: InMemoryLocationStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let service = LocationService::new(self.store.clone());
        App::new()
            .app_data(web::Data::new(service))
            .configure(routes::configure)
    }
}

pub fn location_at(name: &str, lng: f64, lat: f64) -> Location {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "address": format!("{} Street, Reading", name),
        "rating": 4,
        "facilities": ["Hot drinks", "Food"],
        "coords": [lng, lat],
        "openingTimes": [
            { "days": "Monday - Friday", "opening": "7:00am", "closing": "7:00pm", "closed": false },
            { "days": "Sunday", "closed": true },
        ],
        "reviews": [],
    }))
    .unwrap()
}

pub fn review(author: &str, rating: f64) -> Review {
    Review {
        id: Some(ObjectId::new()),
        author: author.to_string(),
        rating,
        review_text: "Lovely coffee".to_string(),
        created_on: Some(bson::DateTime::now()),
    }
}

pub fn starcups_form() -> serde_json::Value {
    serde_json::json!({
        "name": "Starcups",
        "address": "125 High Street, Reading, RG6 1PS",
        "facilities": "Hot drinks,Food,Premium wifi",
        "lng": "-0.9690884",
        "lat": "51.455041",
        "days1": "Monday - Friday",
        "opening1": "7:00am",
        "closing1": "7:00pm",
        "closed1": "false",
        "days2": "Saturday",
        "opening2": "8:00am",
        "closing2": "5:00pm",
        "closed2": "false"
    })
}
