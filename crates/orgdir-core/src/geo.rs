//! Geographic primitives: coordinates, bounding boxes and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Largest search radius accepted by the API, in kilometers.
pub const MAX_RADIUS_KM: f64 = 1000.0;

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create coordinates, checking latitude ∈ [-90, 90] and longitude ∈ [-180, 180].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::LatitudeOutOfRange` or `CoreError::LongitudeOutOfRange`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        great_circle_distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Latitude/longitude rectangle, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    lat_min: f64,
    lon_min: f64,
    lat_max: f64,
    lon_max: f64,
}

impl BoundingBox {
    /// Create a bounding box from its corners.
    ///
    /// Each bound is range-checked on its own axis. A box whose minimum is
    /// above its maximum is accepted and simply contains nothing.
    ///
    /// # Errors
    ///
    /// Returns a range error for the first bound outside its axis.
    pub fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Result<Self> {
        let min = Coordinates::new(lat_min, lon_min)?;
        let max = Coordinates::new(lat_max, lon_max)?;
        Ok(Self::from_corners(min, max))
    }

    /// Build a box from its south-west and north-east corners.
    #[must_use]
    pub const fn from_corners(min: Coordinates, max: Coordinates) -> Self {
        Self {
            lat_min: min.latitude,
            lon_min: min.longitude,
            lat_max: max.latitude,
            lon_max: max.longitude,
        }
    }

    /// Southern edge.
    #[must_use]
    pub const fn lat_min(&self) -> f64 {
        self.lat_min
    }

    /// Western edge.
    #[must_use]
    pub const fn lon_min(&self) -> f64 {
        self.lon_min
    }

    /// Northern edge.
    #[must_use]
    pub const fn lat_max(&self) -> f64 {
        self.lat_max
    }

    /// Eastern edge.
    #[must_use]
    pub const fn lon_max(&self) -> f64 {
        self.lon_max
    }

    /// Whether `point` lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.latitude)
            && (self.lon_min..=self.lon_max).contains(&point.longitude)
    }
}

/// Great-circle distance between two points via the spherical law of cosines.
///
/// `R · acos(cos φ1 · cos φ2 · cos(λ2 − λ1) + sin φ1 · sin φ2)`. Identical
/// points are exactly 0 apart. The acos argument is clamped to [-1, 1] since
/// rounding can push it just past 1 for nearby points.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn great_circle_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let delta_lambda = lon2.to_radians() - lon1.to_radians();

    let cosine = phi1.cos() * phi2.cos() * delta_lambda.cos() + phi1.sin() * phi2.sin();

    EARTH_RADIUS_KM * cosine.clamp(-1.0, 1.0).acos()
}

fn check_latitude(latitude: f64) -> Result<()> {
    if (-90.0..=90.0).contains(&latitude) {
        Ok(())
    } else {
        Err(CoreError::LatitudeOutOfRange(latitude))
    }
}

fn check_longitude(longitude: f64) -> Result<()> {
    if (-180.0..=180.0).contains(&longitude) {
        Ok(())
    } else {
        Err(CoreError::LongitudeOutOfRange(longitude))
    }
}
