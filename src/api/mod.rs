//! REST API module
//!
//! This module provides the HTTP server and REST API endpoints including:
//! - API routing and request handling
//! - Authentication and authorization middleware wiring
//! - Error handling and response formatting

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
pub use middleware::{trace_id_middleware, TraceId, TRACE_ID_HEADER};
