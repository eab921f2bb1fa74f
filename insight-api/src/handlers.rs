//! API route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::debug;

use insight_core::types::ChainFamily;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// POST /getEthBalance
pub async fn get_eth_balance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BalanceRequest>,
) -> Result<Json<Vec<AddressBalance>>> {
    lookup_batch(&state, ChainFamily::Eth, &req).await.map(Json)
}

/// POST /getNeoBalance
pub async fn get_neo_balance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BalanceRequest>,
) -> Result<Json<Vec<AddressBalance>>> {
    lookup_batch(&state, ChainFamily::Neo, &req).await.map(Json)
}

/// Resolves every pair in order. Lookups never fail; an unreachable node
/// shows up as the chain's zero value.
async fn lookup_batch(
    state: &AppState,
    chain: ChainFamily,
    req: &BalanceRequest,
) -> Result<Vec<AddressBalance>> {
    req.validate()?;

    let start = Instant::now();
    let mut balances = Vec::with_capacity(req.address.len());
    for (address, asset) in req.pairs() {
        let value = state.service.lookup(chain, address, asset).await;
        balances.push(AddressBalance {
            address: address.to_string(),
            asset: asset.to_string(),
            value,
        });
    }

    debug!(
        %chain,
        pairs = balances.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Balance batch served"
    );

    Ok(balances)
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime = (Utc::now() - state.started_at).num_seconds();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: uptime,
        refreshing: state.service.is_running(),
        eth_cache_entries: state.service.eth_cache().len().await,
        neo_cache_entries: state.service.neo_cache().len().await,
    })
}
