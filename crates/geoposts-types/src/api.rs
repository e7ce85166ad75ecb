use serde::{Deserialize, Serialize};

/// Natural-order coordinate pair as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Serialized location shared by the JSON API and the HTML templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDict {
    pub id: String,
    pub description: Option<String>,
    pub location: LatLng,
}

// -- Responses --

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreItemResponse {
    pub success: bool,
    pub location: LocationDict,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsInRadiusResponse {
    pub success: bool,
    pub results: Vec<LocationDict>,
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}
