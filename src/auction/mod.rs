pub mod api;
pub mod model;
pub mod wire;

pub use api::{AuctionApi, AuctionService};
