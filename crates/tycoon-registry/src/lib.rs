//! Connection identity registry for Tycoon.
//!
//! Every live transport connection has exactly one entry here recording
//! who it is (assigned player id, display name) and where it is (current
//! room code). The registry is the first stop for every inbound request:
//! identity lookup happens before any routing.
//!
//! # How it fits in the stack
//!
//! ```text
//! Server handler (above)  ← registers on accept, unregisters on close
//!     ↕
//! Registry (this crate)   ← connection → identity mapping
//!     ↕
//! Room directory (beside) ← identity → room routing
//! ```

mod connection;
mod error;
mod registry;

pub use connection::ConnectionInfo;
pub use error::RegistryError;
pub use registry::ConnectionRegistry;
