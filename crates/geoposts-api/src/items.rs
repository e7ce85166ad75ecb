use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use tracing::info;

use geoposts_types::api::{ItemsInRadiusResponse, StoreItemResponse};
use geoposts_types::validate::{
    FieldError, LOCATION_DESCRIPTION_MAX, check_max_len, parse_count, parse_latitude,
    parse_longitude,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters arrive as raw strings so that each bad value gets a
/// field-specific 400. Malformed query strings are caught by `WithRejection`.
#[derive(Debug, Deserialize)]
pub struct StoreItemQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RadiusQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub limit: Option<String>,
}

fn param<T>(
    name: &str,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, FieldError>,
) -> ApiResult<T> {
    parse(raw.unwrap_or_default()).map_err(|e| ApiError::BadRequest(format!("{name}: {e}")))
}

/// GET /api/store_item — create a location from query parameters.
pub async fn store_item(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<StoreItemQuery>, ApiError>,
) -> ApiResult<Json<StoreItemResponse>> {
    let latitude = param("lat", query.lat.as_deref(), parse_latitude)?;
    let longitude = param("lng", query.lng.as_deref(), parse_longitude)?;
    let description = query.description.filter(|d| !d.is_empty());
    if let Some(description) = &description {
        check_max_len(description, LOCATION_DESCRIPTION_MAX)
            .map_err(|e| ApiError::BadRequest(format!("description: {e}")))?;
    }

    let location = state
        .db
        .create_location(description, latitude, longitude)
        .await?;

    Ok(Json(StoreItemResponse {
        success: true,
        location: location.to_dict(),
    }))
}

/// GET /api/get_items_in_radius — nearest locations within `radius` metres.
pub async fn get_items_in_radius(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<RadiusQuery>, ApiError>,
) -> ApiResult<Json<ItemsInRadiusResponse>> {
    let latitude = param("lat", query.lat.as_deref(), parse_latitude)?;
    let longitude = param("lng", query.lng.as_deref(), parse_longitude)?;
    let radius = param("radius", query.radius.as_deref(), parse_count)?;
    let limit = match query.limit.as_deref() {
        Some(raw) => param("limit", Some(raw), parse_count)?,
        None => state.proximity_limit,
    };
    if limit == 0 {
        return Err(ApiError::BadRequest("limit: must be at least 1".into()));
    }
    let limit = limit.min(state.proximity_limit);

    let results = state
        .db
        .find_locations_within_radius(latitude, longitude, f64::from(radius), i64::from(limit))
        .await?;

    info!(
        "Radius query ({}, {}) r={} returned {} item(s)",
        latitude,
        longitude,
        radius,
        results.len()
    );

    Ok(Json(ItemsInRadiusResponse {
        success: true,
        results,
    }))
}
