//! Abstract controller input snapshot.

use serde::{Deserialize, Serialize};

/// Wire size of [`PadState`] in bytes (packed, little-endian, no padding).
pub const PAD_STATE_LEN: usize = 14;

/// One abstract gamepad input snapshot.
///
/// Button semantics are opaque at this layer: `buttons` is carried through
/// to the encoded report as-is. Sticks are full-range signed 16-bit values
/// centered at 0; triggers are unsigned 16-bit with 0 meaning released.
/// Any bit pattern is legal input.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadState {
    pub buttons: u16,
    pub lx: i16,
    pub ly: i16,
    pub rx: i16,
    pub ry: i16,
    pub lt: u16,
    pub rt: u16,
}

const _: [(); PAD_STATE_LEN] = [(); size_of::<PadState>()];
const _: [(); 2] = [(); align_of::<PadState>()];

impl PadState {
    /// Decode from the packed little-endian wire layout.
    pub fn from_le_bytes(bytes: &[u8; PAD_STATE_LEN]) -> Self {
        Self {
            buttons: u16::from_le_bytes([bytes[0], bytes[1]]),
            lx: i16::from_le_bytes([bytes[2], bytes[3]]),
            ly: i16::from_le_bytes([bytes[4], bytes[5]]),
            rx: i16::from_le_bytes([bytes[6], bytes[7]]),
            ry: i16::from_le_bytes([bytes[8], bytes[9]]),
            lt: u16::from_le_bytes([bytes[10], bytes[11]]),
            rt: u16::from_le_bytes([bytes[12], bytes[13]]),
        }
    }

    /// Encode to the packed little-endian wire layout.
    pub fn to_le_bytes(self) -> [u8; PAD_STATE_LEN] {
        let mut out = [0u8; PAD_STATE_LEN];
        out[0..2].copy_from_slice(&self.buttons.to_le_bytes());
        out[2..4].copy_from_slice(&self.lx.to_le_bytes());
        out[4..6].copy_from_slice(&self.ly.to_le_bytes());
        out[6..8].copy_from_slice(&self.rx.to_le_bytes());
        out[8..10].copy_from_slice(&self.ry.to_le_bytes());
        out[10..12].copy_from_slice(&self.lt.to_le_bytes());
        out[12..14].copy_from_slice(&self.rt.to_le_bytes());
        out
    }
}
