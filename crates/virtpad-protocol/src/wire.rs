//! Fixed-size command structures and control codes.
//!
//! All integers are little-endian and all structures are packed with no
//! implicit padding. Decoding validates the buffer length before any field
//! access; a short buffer is always [`WireError::BufferTooSmall`],
//! regardless of its contents. Trailing bytes beyond a structure are
//! ignored, matching buffered-I/O semantics where callers may hand over an
//! oversized system buffer.

use thiserror::Error;

use crate::state::{PAD_STATE_LEN, PadState};

/// Wire-level decode/encode failures.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// Buffer shorter than the structure it must carry.
    #[error("buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    /// `kind` field is not one of the recognized device kinds.
    #[error("unrecognized device kind code {0:#06x}")]
    InvalidKind(u32),
}

const FILE_DEVICE_UNKNOWN: u32 = 0x0000_0022;
const FILE_WRITE_ACCESS: u32 = 0x0002;
const METHOD_BUFFERED: u32 = 0;

/// CTL_CODE layout: `(DeviceType << 16) | (Access << 14) | (Function << 2) | Method`.
const fn ctl_code(device_type: u32, function: u32, method: u32, access: u32) -> u32 {
    (device_type << 16) | (access << 14) | (function << 2) | method
}

/// Function code base for all bus operations.
pub const VIRTPAD_FUNCTION_BASE: u32 = 0x800;

/// Control code selecting the create operation.
pub const IOCTL_VIRTPAD_CREATE: u32 =
    ctl_code(FILE_DEVICE_UNKNOWN, VIRTPAD_FUNCTION_BASE, METHOD_BUFFERED, FILE_WRITE_ACCESS);
/// Control code selecting the update operation.
pub const IOCTL_VIRTPAD_UPDATE: u32 =
    ctl_code(FILE_DEVICE_UNKNOWN, VIRTPAD_FUNCTION_BASE + 1, METHOD_BUFFERED, FILE_WRITE_ACCESS);
/// Control code selecting the destroy operation.
pub const IOCTL_VIRTPAD_DESTROY: u32 =
    ctl_code(FILE_DEVICE_UNKNOWN, VIRTPAD_FUNCTION_BASE + 2, METHOD_BUFFERED, FILE_WRITE_ACCESS);

/// Stable 128-bit identifier the owning process publishes so the user-mode
/// counterpart can locate this service. Agreed out-of-band; never
/// negotiated.
pub const VIRTPAD_INTERFACE_GUID: u128 = 0x7F1C_03A4_9D2E_4B8F_B0C6_5DE1_AA40_7C19;

fn require(buf: &[u8], expected: usize) -> Result<(), WireError> {
    if buf.len() < expected {
        return Err(WireError::BufferTooSmall { expected, actual: buf.len() });
    }
    Ok(())
}

/// Input structure of the create operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateRequest {
    /// Raw kind code; validated into a
    /// [`DeviceKind`](crate::DeviceKind) by the dispatcher so that a short
    /// buffer and an out-of-range kind stay distinct failures.
    pub kind: u32,
    /// Forward-compatibility bitflags, carried but not interpreted.
    pub features: u32,
}

/// Wire size of [`CreateRequest`].
pub const CREATE_REQUEST_LEN: usize = 8;

impl CreateRequest {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        require(buf, CREATE_REQUEST_LEN)?;
        Ok(Self {
            kind: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            features: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        })
    }

    pub fn to_le_bytes(self) -> [u8; CREATE_REQUEST_LEN] {
        let mut out = [0u8; CREATE_REQUEST_LEN];
        out[0..4].copy_from_slice(&self.kind.to_le_bytes());
        out[4..8].copy_from_slice(&self.features.to_le_bytes());
        out
    }
}

/// Output structure of the create operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateResponse {
    pub handle: u64,
}

/// Wire size of [`CreateResponse`].
pub const CREATE_RESPONSE_LEN: usize = 8;

impl CreateResponse {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        require(buf, CREATE_RESPONSE_LEN)?;
        Ok(Self {
            handle: u64::from_le_bytes([
                buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
            ]),
        })
    }

    /// Fill a caller-supplied output buffer; returns the bytes written.
    pub fn write_to(self, out: &mut [u8]) -> Result<usize, WireError> {
        require(out, CREATE_RESPONSE_LEN)?;
        out[0..CREATE_RESPONSE_LEN].copy_from_slice(&self.handle.to_le_bytes());
        Ok(CREATE_RESPONSE_LEN)
    }
}

/// Input structure of the update operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateRequest {
    pub handle: u64,
    pub state: PadState,
}

/// Wire size of [`UpdateRequest`] (packed: 8-byte handle + 14-byte state).
pub const UPDATE_REQUEST_LEN: usize = 8 + PAD_STATE_LEN;

impl UpdateRequest {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        require(buf, UPDATE_REQUEST_LEN)?;
        let handle = u64::from_le_bytes([
            buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
        ]);
        let mut state = [0u8; PAD_STATE_LEN];
        state.copy_from_slice(&buf[8..UPDATE_REQUEST_LEN]);
        Ok(Self { handle, state: PadState::from_le_bytes(&state) })
    }

    pub fn to_le_bytes(self) -> [u8; UPDATE_REQUEST_LEN] {
        let mut out = [0u8; UPDATE_REQUEST_LEN];
        out[0..8].copy_from_slice(&self.handle.to_le_bytes());
        out[8..UPDATE_REQUEST_LEN].copy_from_slice(&self.state.to_le_bytes());
        out
    }
}

/// Input structure of the destroy operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DestroyRequest {
    pub handle: u64,
}

/// Wire size of [`DestroyRequest`].
pub const DESTROY_REQUEST_LEN: usize = 8;

impl DestroyRequest {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        require(buf, DESTROY_REQUEST_LEN)?;
        Ok(Self {
            handle: u64::from_le_bytes([
                buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
            ]),
        })
    }

    pub fn to_le_bytes(self) -> [u8; DESTROY_REQUEST_LEN] {
        let mut out = [0u8; DESTROY_REQUEST_LEN];
        out[0..8].copy_from_slice(&self.handle.to_le_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_codes_are_abi_stable() {
        // Both sides ship these values; they must never drift.
        assert_eq!(IOCTL_VIRTPAD_CREATE, 0x0022_A000);
        assert_eq!(IOCTL_VIRTPAD_UPDATE, 0x0022_A004);
        assert_eq!(IOCTL_VIRTPAD_DESTROY, 0x0022_A008);
    }

    #[test]
    fn short_create_input_is_rejected() {
        let err = CreateRequest::decode(&[0u8; 7]);
        assert_eq!(
            err,
            Err(WireError::BufferTooSmall { expected: 8, actual: 7 })
        );
    }

    #[test]
    fn create_request_field_offsets() {
        let req = CreateRequest { kind: 0x0366, features: 0x0000_0003 };
        let bytes = req.to_le_bytes();
        assert_eq!(bytes, [0x66, 0x03, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00]);
        assert_eq!(CreateRequest::decode(&bytes), Ok(req));
    }

    #[test]
    fn update_request_is_packed() {
        assert_eq!(UPDATE_REQUEST_LEN, 22);
        let req = UpdateRequest {
            handle: 0x0102_0304_0506_0708,
            state: PadState { buttons: 0xAABB, ..PadState::default() },
        };
        let bytes = req.to_le_bytes();
        assert_eq!(&bytes[0..8], &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[8..10], &[0xBB, 0xAA]);
        assert_eq!(UpdateRequest::decode(&bytes), Ok(req));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut oversized = [0u8; 64];
        oversized[0] = 0x2A;
        let req = DestroyRequest::decode(&oversized);
        assert_eq!(req, Ok(DestroyRequest { handle: 0x2A }));
    }

    #[test]
    fn response_write_checks_capacity() {
        let resp = CreateResponse { handle: 7 };
        let mut tiny = [0u8; 4];
        assert_eq!(
            resp.write_to(&mut tiny),
            Err(WireError::BufferTooSmall { expected: 8, actual: 4 })
        );

        let mut out = [0u8; 8];
        assert_eq!(resp.write_to(&mut out), Ok(8));
        assert_eq!(out, [7, 0, 0, 0, 0, 0, 0, 0]);
    }
}
