use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::models::location::{Location, OpeningTime};

/// A number that may arrive as a JSON number or as form text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(f64),
    Text(String),
}

impl FormNumber {
    pub fn value(&self) -> Option<f64> {
        let number = match self {
            FormNumber::Number(n) => Some(*n),
            FormNumber::Text(text) => parse_number(text),
        };
        number.filter(|n| n.is_finite())
    }
}

/// Reads the leading decimal number of `text`, ignoring whatever follows it,
/// so `"5km"` is 5.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let sign_end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(sign_end);
    let mut end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        end = digits_from(int_end + 1);
    }
    if int_end == sign_end && end <= int_end + 1 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exponent_start = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_end = digits_from(exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `GET /api/locations` query string.
#[derive(Debug, Default, Deserialize)]
pub struct DistanceQuery {
    pub lng: Option<String>,
    pub lat: Option<String>,
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<String>,
}

impl DistanceQuery {
    /// `(lng, lat, max_distance_km)`, or `None` when any value is missing, not
    /// a number, or zero.
    pub fn coordinates(&self) -> Option<(f64, f64, f64)> {
        let truthy = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(parse_number)
                .filter(|n| *n != 0.0)
        };
        Some((
            truthy(&self.lng)?,
            truthy(&self.lat)?,
            truthy(&self.max_distance)?,
        ))
    }
}

/// Body of create and update requests, JSON or urlencoded.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct LocationForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub facilities: Option<String>,
    pub lng: Option<FormNumber>,
    pub lat: Option<FormNumber>,
    pub days1: Option<String>,
    pub opening1: Option<String>,
    pub closing1: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub closed1: Option<bool>,
    pub days2: Option<String>,
    pub opening2: Option<String>,
    pub closing2: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub closed2: Option<bool>,
}

/// The editable part of a location, validated from a [`LocationForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDraft {
    pub name: String,
    pub address: String,
    pub facilities: Vec<String>,
    pub coords: [f64; 2],
    pub opening_times: [OpeningTime; 2],
}

impl LocationDraft {
    /// A brand new record with the defaults the reviews subsystem expects.
    pub fn into_new_location(self) -> Location {
        Location {
            id: None,
            name: self.name,
            address: self.address,
            rating: Some(0.0),
            facilities: self.facilities,
            coords: self.coords,
            opening_times: self.opening_times,
            reviews: Some(Vec::new()),
        }
    }

    /// Overwrites every editable field of `location`, leaving `_id`, `rating`
    /// and `reviews` alone.
    pub fn apply_to(self, location: &mut Location) {
        location.name = self.name;
        location.address = self.address;
        location.facilities = self.facilities;
        location.coords = self.coords;
        location.opening_times = self.opening_times;
    }
}

impl TryFrom<LocationForm> for LocationDraft {
    type Error = String;

    fn try_from(form: LocationForm) -> Result<Self, Self::Error> {
        let name = required_text(form.name, "name")?;
        let address = required_text(form.address, "address")?;
        let lng = required_number(form.lng.as_ref(), "lng")?;
        let lat = required_number(form.lat.as_ref(), "lat")?;

        let first = opening_time(form.days1, form.opening1, form.closing1, form.closed1, 1)?;
        let second = opening_time(form.days2, form.opening2, form.closing2, form.closed2, 2)?;

        Ok(LocationDraft {
            name,
            address,
            facilities: split_facilities(form.facilities.as_deref().unwrap_or_default()),
            coords: [lng, lat],
            opening_times: [first, second],
        })
    }
}

pub fn split_facilities(facilities: &str) -> Vec<String> {
    facilities
        .split(',')
        .map(str::trim)
        .filter(|facility| !facility.is_empty())
        .map(String::from)
        .collect()
}

fn required_text(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(format!("{} is required", field)),
    }
}

fn required_number(value: Option<&FormNumber>, field: &str) -> Result<f64, String> {
    match value {
        None => Err(format!("{} is required", field)),
        Some(number) => number
            .value()
            .ok_or_else(|| format!("{} must be a number", field)),
    }
}

fn opening_time(
    days: Option<String>,
    opening: Option<String>,
    closing: Option<String>,
    closed: Option<bool>,
    slot: u8,
) -> Result<OpeningTime, String> {
    let days = required_text(days, &format!("days{}", slot))?;
    let closed = closed.ok_or_else(|| format!("closed{} is required", slot))?;
    let non_empty = |value: Option<String>| value.filter(|text| !text.trim().is_empty());

    Ok(OpeningTime {
        days,
        opening: non_empty(opening),
        closing: non_empty(closing),
        closed,
    })
}
