use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use geoposts_db::Database;

/// Shared application state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Signs the flash and CSRF cookies.
    pub cookie_key: Key,
    pub maps_key: String,
    /// Default and upper bound for proximity results.
    pub proximity_limit: u32,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    // The driver connects lazily; handlers that fail before storage never touch it.
    let db = Database::connect("mongodb://127.0.0.1:27017", "geoposts_unit")
        .await
        .unwrap();

    AppState {
        db,
        cookie_key: Key::generate(),
        maps_key: "test-maps-key".into(),
        proximity_limit: 100,
    }
}
