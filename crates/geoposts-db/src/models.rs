//! Document types, stored as-is in MongoDB.
//! Kept separate from the wire shapes in geoposts-types.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use geoposts_types::api::{LatLng, LocationDict};
use geoposts_types::geo::{GeoPoint, point_latitude, point_longitude, to_storage_point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub geom: GeoPoint,
}

impl Location {
    pub fn new(description: Option<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: ObjectId::new(),
            description,
            geom: to_storage_point(latitude, longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        point_latitude(&self.geom)
    }

    pub fn longitude(&self) -> f64 {
        point_longitude(&self.geom)
    }

    pub fn to_dict(&self) -> LocationDict {
        LocationDict {
            id: self.id.to_hex(),
            description: self.description.clone(),
            location: LatLng {
                lat: self.latitude(),
                lng: self.longitude(),
            },
        }
    }
}

/// Partial update for a location. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct LocationUpdate {
    pub description: Option<String>,
    /// (latitude, longitude)
    pub position: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_posted: DateTime<Utc>,
    pub content: String,
}

impl Post {
    /// `date_posted` is taken from the clock on every call.
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: ObjectId::new(),
            title,
            date_posted: Utc::now(),
            content,
        }
    }
}
