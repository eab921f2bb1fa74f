//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/getEthBalance", post(handlers::get_eth_balance))
        .route("/getNeoBalance", post(handlers::get_neo_balance))
        .with_state(state)
}
