//! # Wallet Insight API Server
//!
//! HTTP boundary of the balance cache. Each endpoint takes parallel lists of
//! addresses and assets and answers one balance per pair, in input order.
//!
//! ## Endpoints
//!
//! - `POST /getEthBalance` - Ethereum native and ERC-20 balances (hex)
//! - `POST /getNeoBalance` - NEO asset balances (decimal strings)
//! - `GET /health` - Liveness and cache sizes
//!
//! ## Example
//!
//! ```rust,ignore
//! use insight_api::{ApiServer, InsightConfig};
//!
//! let config = InsightConfig::load("wallet-insight.json".as_ref())?;
//! let server = ApiServer::new(config)?;
//! server.run(tokio::signal::ctrl_c().map(|_| ())).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod service;
mod state;

pub use dto::{AddressBalance, BalanceRequest, HealthResponse};
pub use error::ApiError;
pub use routes::create_router;
pub use service::BalanceService;
pub use state::{AppState, InsightConfig};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use insight_core::error::{InsightError, Result};

/// API server for wallet-insight.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server backed by live RPC clients built from `config`.
    pub fn new(config: InsightConfig) -> Result<Self> {
        Ok(Self::from_state(Arc::new(AppState::new(config)?)))
    }

    /// Creates a server around an existing state.
    pub fn from_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Starts the refresh schedulers and serves until `shutdown` resolves,
    /// then stops the schedulers.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.state.config.bind_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;

        self.state.service.start()?;
        info!("Wallet insight API listening on {}", addr);

        let served = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await;

        self.state.service.shutdown().await;
        info!("Wallet insight API stopped");

        served.map_err(InsightError::from)
    }
}
