//! Portal server module - the request service around the geo-tag decoder
//!
//! A line-delimited JSON-RPC server over an SQLite database of work requests,
//! their photo/video evidence and lookup tables.
//!
//! # Module Structure
//! - `protocol` - JSON-RPC request/response types
//! - `config` - Server configuration
//! - `state` - Server state (database + config)
//! - `store` - SQLite persistence
//! - `util` - Logging setup
//! - `handlers` - Request handlers organized by functionality

pub mod config;
pub mod handlers;
pub mod protocol;
pub mod state;
pub mod store;
pub mod util;

// Re-export key types for convenience
pub use config::PortalConfig;
pub use handlers::{dispatch, handle_line};
pub use protocol::{Request, Response, ErrorResponse, error_codes};
pub use state::PortalState;
pub use store::{Store, StoreError};
