//! Bus error taxonomy.
//!
//! Every failure is detected and reported synchronously by the operation
//! that encountered it; nothing is retried internally, and a failed
//! operation never commits partial state. Adapter-originated errors pass
//! through unchanged.

use thiserror::Error;
use virtpad_protocol::WireError;

use crate::adapter::AdapterError;

/// Status outcomes of bus operations.
#[derive(Debug, Error)]
pub enum BusError {
    /// Input or output buffer shorter than the structure it must carry.
    #[error("buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    /// Out-of-range enumerated value (unrecognized device kind).
    #[error("invalid parameter: unrecognized device kind {0:#06x}")]
    InvalidParameter(u32),

    /// Operation references a handle not present in the registry.
    #[error("no live device with handle {0}")]
    InvalidHandle(u64),

    /// Allocation or adapter-resource creation failure.
    #[error("insufficient resources: {0}")]
    InsufficientResources(String),

    /// Unrecognized control code.
    #[error("unrecognized control code {0:#010x}")]
    InvalidRequest(u32),

    /// Adapter-originated failure, surfaced unchanged.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl BusError {
    /// True when the caller supplied a malformed request (as opposed to a
    /// failure in the bus or the adapter).
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            BusError::BufferTooSmall { .. }
                | BusError::InvalidParameter(_)
                | BusError::InvalidHandle(_)
                | BusError::InvalidRequest(_)
        )
    }
}

impl From<WireError> for BusError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::BufferTooSmall { expected, actual } => {
                BusError::BufferTooSmall { expected, actual }
            }
            WireError::InvalidKind(code) => BusError::InvalidParameter(code),
        }
    }
}

/// Specialized `Result` for bus operations.
pub type BusResult<T> = Result<T, BusError>;
