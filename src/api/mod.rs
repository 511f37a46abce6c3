//! Gridmap API Server module
//!
//! Provides HTTP REST API access to range shaping and record mapping.
//! Run with `gridmap-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server};
