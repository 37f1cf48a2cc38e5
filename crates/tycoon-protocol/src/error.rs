//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding wire messages.
///
/// A `Decode` on an inbound frame is a client problem (malformed or
/// unknown message) and is reported back as an `error` frame without
/// closing the connection; an `Encode` is a server bug.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
