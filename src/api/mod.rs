//! HTTP API for the dashboard

pub mod handlers;
pub mod routes;
pub mod ws_handlers;

pub use routes::create_router;
