//! CTSLite Server - HTTP REST API for chemical identifier resolution
//!
//! Loads a PubChemLite export into a [`index::CompoundIndex`] at startup and
//! answers batches of whitespace separated identifiers (InChIKey, InChI,
//! SMILES, molecular formula) with one result per query.
//!
//! # Features
//!
//! - **Output negotiation**: JSON by default, CSV via `format=csv` or `Accept: text/csv`
//! - **Hot reload**: rebuild the index from disk without dropping requests
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health`, `GET /status` - Liveness probe
//! - `GET /ready` - Readiness probe with index counts
//! - `GET /match?q=...` - Resolve a batch (`format=csv`, `shape=compounds` optional)
//! - `POST /api/v1/match` - Resolve a batch from a JSON body `{"q": "..."}`
//! - `GET /api/v1/index/stats` - Index statistics
//!
//! ## Protected Endpoints (API Key Required)
//!
//! - `POST /api/v1/index/reload` - Rebuild the index from the configured dataset

pub mod config;
pub mod encode;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
