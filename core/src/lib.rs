pub mod api;
pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod normalize;
pub mod review;
pub mod task;
