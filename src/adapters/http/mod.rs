//! HTTP adapter: axum handlers, DTOs, and router assembly.

mod dto;
mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::app_router;
