//! Error types for event decoding

/// Errors turning a named channel payload into a [`crate::RetroEvent`]
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Event name the reconciler does not consume
    #[error("unknown event: '{0}'")]
    UnknownEvent(String),

    /// Payload does not match the event's shape
    #[error("invalid payload for '{event}': {source}")]
    InvalidPayload {
        /// Wire name of the event
        event: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}
