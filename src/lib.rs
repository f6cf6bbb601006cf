pub mod app;
pub mod client;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reports;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
