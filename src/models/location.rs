use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A place stored in the `locations` collection.
///
/// `rating` and `reviews` are owned by the reviews subsystem. They come back as
/// `None` when the document was fetched with those fields projected out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub facilities: Vec<String>,
    /// `[lng, lat]`
    pub coords: [f64; 2],
    #[serde(rename = "openingTimes")]
    pub opening_times: [OpeningTime; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

impl Location {
    pub fn lng(&self) -> f64 {
        self.coords[0]
    }

    pub fn lat(&self) -> f64 {
        self.coords[1]
    }

    /// Copy of the record without the fields the reviews subsystem owns.
    pub fn without_reviews(&self) -> Location {
        Location {
            rating: None,
            reviews: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningTime {
    pub days: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author: String,
    pub rating: f64,
    #[serde(rename = "reviewText", default)]
    pub review_text: String,
    #[serde(rename = "createdOn", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime>,
}

/// GeoJSON point used as the centre of a proximity query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    kind: PointKind,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum PointKind {
    Point,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            kind: PointKind::Point,
            coordinates: [lng, lat],
        }
    }

    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoNearOptions {
    pub spherical: bool,
    /// Meters when `spherical` is set.
    pub max_distance: f64,
    pub limit: i64,
}

/// One hit of a geo-near query: distance in meters plus the stored document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoNearMatch {
    pub dis: f64,
    pub obj: Location,
}
