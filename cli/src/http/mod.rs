//! HTTP server exposing the review pipeline.

pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

pub use models::*;
pub use server::*;
pub use state::*;
