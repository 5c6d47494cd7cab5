pub mod app;
pub mod auction;
pub mod config;
pub mod error;
pub mod profile;
pub mod router;
pub mod store;
pub mod transport;
