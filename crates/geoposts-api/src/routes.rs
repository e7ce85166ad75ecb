use axum::{Router, routing::get};

use crate::error::ApiError;
use crate::state::AppState;
use crate::{items, pages};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/detail", get(pages::detail))
        .route(
            "/new-location",
            get(pages::new_location_form).post(pages::new_location_submit),
        )
        .route("/new-post", get(pages::new_post_form).post(pages::new_post_submit))
        .route("/api/store_item", get(items::store_item))
        .route("/api/get_items_in_radius", get(items::get_items_in_radius))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
