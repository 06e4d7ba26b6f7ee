pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod store;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use store::resolve_store;
