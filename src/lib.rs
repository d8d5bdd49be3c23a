pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use api::router;
pub use config::AppConfig;
pub use db::{open_store, PortalStore, StoreError};
pub use models::AppState;
