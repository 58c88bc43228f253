//! Request parameter validation.
//!
//! Each function checks one parameter group and reports the first violated
//! bound.

use orgdir_core::{BoundingBox, Coordinates, CoreError, Page, MAX_LIMIT, MAX_RADIUS_KM};

/// A request parameter outside its accepted range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// An integer below its lower bound.
    #[error("{field} must be greater than or equal to {min}")]
    TooSmall {
        /// Parameter name.
        field: &'static str,
        /// Smallest accepted value.
        min: i64,
    },

    /// A number outside a closed interval.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Parameter name.
        field: &'static str,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// An empty string.
    #[error("{field} must not be empty")]
    Empty {
        /// Parameter name.
        field: &'static str,
    },
}

/// Result type for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A surrogate key: `raw >= 1`.
///
/// # Errors
///
/// Returns `ValidationError::TooSmall` for zero or negative keys.
pub fn positive_id(field: &'static str, raw: i64) -> Result<i64> {
    if raw < 1 {
        return Err(ValidationError::TooSmall { field, min: 1 });
    }
    Ok(raw)
}

/// Pagination: `page >= 1`, `limit` in `1..=MAX_LIMIT`.
///
/// # Errors
///
/// Returns the first violated bound.
pub fn page(page: i64, limit: i64) -> Result<Page> {
    if page < 1 {
        return Err(ValidationError::TooSmall { field: "page", min: 1 });
    }
    let page = page.unsigned_abs();

    let limit = u32::try_from(limit)
        .ok()
        .filter(|limit| (1..=MAX_LIMIT).contains(limit))
        .ok_or(ValidationError::OutOfRange {
            field: "limit",
            min: 1.0,
            max: f64::from(MAX_LIMIT),
        })?;

    Ok(Page::new(page, limit))
}

/// A query point from `latitude` and `longitude`.
///
/// # Errors
///
/// Returns the first coordinate out of range.
pub fn center(lat: f64, lon: f64) -> Result<Coordinates> {
    point(lat, lon, "latitude", "longitude")
}

/// A search radius in `[0, MAX_RADIUS_KM]` kilometres.
///
/// # Errors
///
/// Returns `ValidationError::OutOfRange` otherwise.
pub fn radius(value: f64) -> Result<f64> {
    within("radius", value, 0.0, MAX_RADIUS_KM)
}

/// A bounding box; each corner coordinate is range-checked.
///
/// `lat_min > lat_max` (or the same for longitude) is accepted and simply
/// matches nothing.
///
/// # Errors
///
/// Returns the first coordinate out of range, in `lat_min`, `lon_min`,
/// `lat_max`, `lon_max` order.
pub fn bbox(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Result<BoundingBox> {
    let min = point(lat_min, lon_min, "lat_min", "lon_min")?;
    let max = point(lat_max, lon_max, "lat_max", "lon_max")?;
    Ok(BoundingBox::from_corners(min, max))
}

/// A non-empty organization name.
///
/// # Errors
///
/// Returns `ValidationError::Empty` for an empty string.
pub fn name(value: &str) -> Result<&str> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field: "name" });
    }
    Ok(value)
}

fn point(
    lat: f64,
    lon: f64,
    lat_field: &'static str,
    lon_field: &'static str,
) -> Result<Coordinates> {
    Coordinates::new(lat, lon).map_err(|err| match err {
        CoreError::LatitudeOutOfRange(_) => ValidationError::OutOfRange {
            field: lat_field,
            min: -90.0,
            max: 90.0,
        },
        // Coordinates::new reports nothing but range errors.
        _ => ValidationError::OutOfRange {
            field: lon_field,
            min: -180.0,
            max: 180.0,
        },
    })
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}
