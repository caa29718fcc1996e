use serde::Serialize;

use crate::models::location::{GeoNearMatch, Location, OpeningTime, Review};
use crate::services::geo::m_to_km;

/// JSON shape of a stored location, with ids rendered as hex strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub facilities: Vec<String>,
    pub coords: [f64; 2],
    #[serde(rename = "openingTimes")]
    pub opening_times: [OpeningTime; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewResponse>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewResponse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub author: String,
    pub rating: f64,
    #[serde(rename = "reviewText")]
    pub review_text: String,
    #[serde(rename = "createdOn", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

/// One entry of the list-by-distance result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLocation {
    /// Kilometers from the query point.
    pub distance: f64,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub facilities: Vec<String>,
    #[serde(rename = "_id")]
    pub id: String,
}

fn hex_id(id: Option<bson::oid::ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id.map(|id| id.to_hex()),
            author: review.author,
            rating: review.rating,
            review_text: review.review_text,
            created_on: review
                .created_on
                .and_then(|created| created.try_to_rfc3339_string().ok()),
        }
    }
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        LocationResponse {
            id: hex_id(location.id),
            name: location.name,
            address: location.address,
            rating: location.rating,
            facilities: location.facilities,
            coords: location.coords,
            opening_times: location.opening_times,
            reviews: location
                .reviews
                .map(|reviews| reviews.into_iter().map(ReviewResponse::from).collect()),
        }
    }
}

impl From<GeoNearMatch> for RankedLocation {
    fn from(hit: GeoNearMatch) -> Self {
        RankedLocation {
            distance: m_to_km(hit.dis),
            name: hit.obj.name,
            address: hit.obj.address,
            rating: hit.obj.rating,
            facilities: hit.obj.facilities,
            id: hex_id(hit.obj.id),
        }
    }
}
