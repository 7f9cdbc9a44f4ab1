//! # Matisse Commander
//!
//! Blocking client for the Sirah Matisse Commander TCP server, which
//! remotely controls and queries a Matisse laser:
//! - Length-prefixed ASCII framing
//! - Typed parsing of `:NAME: VALUE` replies
//! - Query/set exchange with one reply per request
//! - Close handshake with the settling delay the server requires
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Commander (network)                          │
//! │     connect / disconnect / query / set / server_alive        │
//! └──────────┬──────────────────────────────────▲───────────────┘
//!            │ Command                          │ Value
//!            ▼                                  │
//!   ┌─────────────────┐                ┌────────┴────────┐
//!   │  Frame Codec    │                │ Response Parser │
//!   │ (len + ASCII)   │                │  (5 shapes)     │
//!   └────────┬────────┘                └────────▲────────┘
//!            │                                  │
//!            ▼                                  │
//!   ┌──────────────────────────────────────────────────────┐
//!   │                  TCP stream                          │
//!   └──────────────────────────────────────────────────────┘
//! ```
//!
//! Piezo setters run [`validate::validate_piezo_value`] before anything is
//! written to the stream.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod validate;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MatisseError, Result};
pub use config::Config;
pub use network::Commander;
pub use protocol::{ControlStatus, SetValue, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
