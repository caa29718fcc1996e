//! Distance unit conversions used around geo-near queries.
//!
//! Spherical `$geoNear` queries against GeoJSON points take and return meters,
//! while the API speaks kilometers. Legacy radian distances are converted with
//! the mean earth radius.

/// Mean earth radius in kilometers (3959 for miles).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn km_to_m(distance: f64) -> f64 {
    distance * 1000.0
}

pub fn m_to_km(distance: f64) -> f64 {
    distance / 1000.0
}

pub fn rads_to_km(rads: f64) -> f64 {
    rads * EARTH_RADIUS_KM
}

/// Haversine distance between two `[lng, lat]` pairs given in degrees.
pub fn great_circle_distance_km(from: [f64; 2], to: [f64; 2]) -> f64 {
    let (lng1, lat1) = (from[0].to_radians(), from[1].to_radians());
    let (lng2, lat2) = (to[0].to_radians(), to[1].to_radians());

    let half_chord = ((lat2 - lat1) / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * ((lng2 - lng1) / 2.0).sin().powi(2);
    let central_angle = 2.0 * half_chord.sqrt().min(1.0).asin();

    rads_to_km(central_angle)
}
