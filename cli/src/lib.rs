//! diffscope-cli library: modules exposed for unit tests.

pub mod app;
pub mod commands;
pub mod http;
pub mod render;
pub mod utils;
