//! Codec trait and implementations for serializing messages.
//!
//! The rest of the stack never calls `serde_json` directly — it goes
//! through the [`Codec`] trait so the wire format can be swapped (a
//! compact binary codec, say) without touching the handler or room code.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust types to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because the codec is stored in long-lived
/// server state shared across connection tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// [`ProtocolError::Decode`] if the bytes are malformed, incomplete,
    /// or the wrong shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that speaks JSON via `serde_json`.
///
/// Human-readable, so frames can be inspected in browser DevTools while
/// developing a client. Behind the `json` feature (enabled by default).
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{ClientMessage, ServerMessage};

    #[test]
    fn test_json_codec_round_trips_client_message() {
        let codec = JsonCodec;
        let msg = ClientMessage::BuyProperty { tile_id: 7 };

        let bytes = codec.encode(&msg).unwrap();
        let decoded: ClientMessage = codec.decode(&bytes).unwrap();

        assert_eq!(msg, decoded);
    }

    #[test]
    fn test_json_codec_decode_malformed_is_decode_error() {
        let codec = JsonCodec;
        let result: Result<ServerMessage, _> = codec.decode(b"{nope");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }
}
