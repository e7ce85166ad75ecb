use serde::{Deserialize, Serialize};

/// GeoJSON point as stored in the `geom` field of a location document.
///
/// `coordinates` is `[longitude, latitude]`. That order is the reverse of the
/// usual "lat, lng" reading, so build and read points only through
/// [`to_storage_point`], [`point_latitude`] and [`point_longitude`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    Point,
}

/// Map a natural (latitude, longitude) pair to the storage point.
/// No range checks; see [`crate::validate`] for those.
pub fn to_storage_point(latitude: f64, longitude: f64) -> GeoPoint {
    GeoPoint {
        kind: PointKind::Point,
        coordinates: [longitude, latitude],
    }
}

pub fn point_latitude(point: &GeoPoint) -> f64 {
    point.coordinates[1]
}

pub fn point_longitude(point: &GeoPoint) -> f64 {
    point.coordinates[0]
}
