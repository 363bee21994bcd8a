//! Unified error type for the CSC client.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (feature `defmt`) for efficient on-target logging.

use core::fmt;

/// Top-level error type returned by every fallible client operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A required argument was absent (caller bug).
    NullArgument,

    /// The operation needs an active connection and/or completed discovery.
    InvalidState,

    /// Notification bytes are too short for the flags they declare.
    MalformedPayload,

    /// Status reported by the external GATT queue or registration call.
    Transport(TransportError),
}

/// Status codes surfaced verbatim from the external GATT queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The request queue has no room for another item.
    QueueFull,
    /// The link the request targets is not (or no longer) registered.
    NotConnected,
    /// Any other stack status code.
    Raw(u32),
}

// Convenience conversions

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NullArgument => f.write_str("required argument missing"),
            Error::InvalidState => f.write_str("invalid state"),
            Error::MalformedPayload => f.write_str("malformed payload"),
            Error::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::QueueFull => f.write_str("queue full"),
            TransportError::NotConnected => f.write_str("not connected"),
            TransportError::Raw(code) => write!(f, "status 0x{:X}", code),
        }
    }
}
