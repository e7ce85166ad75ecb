pub mod error;
pub mod forms;
pub mod items;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;
mod templates;

pub use routes::router;
pub use state::AppState;
