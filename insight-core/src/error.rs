//! Error types for wallet-insight.
//!
//! This module provides the error hierarchy using `thiserror`.
//! Upstream failures are recoverable: the cache swallows them and
//! serves a sentinel or the last known value instead.

use thiserror::Error;

/// Result type alias using `InsightError`.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Main error type for all wallet-insight operations.
#[derive(Debug, Error)]
pub enum InsightError {
    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request to a chain node failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Connection or request timed out.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// JSON-RPC call returned an error object.
    #[error("RPC call '{method}' failed: {reason}")]
    RpcError { method: String, reason: String },

    /// JSON-RPC response could not be interpreted.
    #[error("Malformed RPC response for '{method}': {reason}")]
    MalformedResponse { method: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // KEY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Address is not valid for the target chain.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Asset identifier is not valid for the target chain.
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    // ═══════════════════════════════════════════════════════════════════════════
    // LOCAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl InsightError {
    /// Builds an [`InsightError::RpcError`].
    pub fn rpc(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RpcError {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Builds an [`InsightError::MalformedResponse`].
    pub fn malformed(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is an upstream fetch failure (a later refresh may succeed).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            InsightError::HttpError(_)
                | InsightError::ConnectionTimeout(_)
                | InsightError::RpcError { .. }
                | InsightError::MalformedResponse { .. }
        )
    }

    /// Returns true if the address or asset itself was rejected.
    pub fn is_invalid_key(&self) -> bool {
        matches!(
            self,
            InsightError::InvalidAddress(_) | InsightError::InvalidAsset(_)
        )
    }
}
