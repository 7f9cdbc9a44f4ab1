//! Network Module
//!
//! TCP client for Matisse Commander.
//!
//! ## Architecture
//! - `Connection` owns the socket and moves frames
//! - `Commander` owns at most one `Connection` and implements the
//!   query/set exchange, close handshake and liveness check
//! - Named device properties are typed wrappers over `Commander`

mod connection;
mod commander;
mod device;

pub use connection::Connection;
pub use commander::Commander;
pub use device::variables;
