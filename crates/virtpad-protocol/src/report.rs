//! Per-kind HID input report encoding.
//!
//! `encode` is pure and deterministic: the same kind and state always
//! produce byte-identical output. No range clamping is performed — every
//! 16-bit input value is legal and maps through the stated arithmetic.
//! Trigger downscaling (and stick downscaling on the PlayStation layout)
//! keeps only the top byte; the precision loss is part of the wire format.

use crate::kind::DeviceKind;
use crate::state::PadState;

/// Report ID shared by every kind's input report.
pub const REPORT_ID: u8 = 0x01;

/// Length of the Xbox-style input report.
pub const XBOX_REPORT_LEN: usize = 13;

/// Length of the PlayStation-style input report (both PS kinds).
pub const PS_REPORT_LEN: usize = 9;

/// Capacity of a report buffer; no kind's report exceeds this.
pub const MAX_REPORT_LEN: usize = 64;

/// One encoded input report: a fixed backing buffer plus the valid length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    buf: [u8; MAX_REPORT_LEN],
    len: usize,
}

impl Report {
    /// Zero-length report, used as the initial scratch value before a
    /// device's first update.
    pub fn empty() -> Self {
        Self { buf: [0u8; MAX_REPORT_LEN], len: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Remap a full-range signed axis onto the unsigned 8-bit wire range:
/// -32768 maps to 0, 0 to 128, 32767 to 255.
#[expect(clippy::cast_sign_loss, reason = "shift result is confined to 0..=255")]
fn axis_to_u8(value: i16) -> u8 {
    ((i32::from(value) + 32_768) >> 8) as u8
}

/// Encode `state` in the wire report format of `kind`.
pub fn encode(kind: DeviceKind, state: &PadState) -> Report {
    match kind {
        DeviceKind::Xbox360 => encode_xbox(state),
        DeviceKind::DualShock4 | DeviceKind::DualSense => encode_playstation(state),
    }
}

/// Xbox-style layout: report ID, buttons LE, trigger top bytes, then four
/// full-precision 16-bit stick axes LE.
fn encode_xbox(state: &PadState) -> Report {
    let mut buf = [0u8; MAX_REPORT_LEN];
    buf[0] = REPORT_ID;
    buf[1..3].copy_from_slice(&state.buttons.to_le_bytes());
    buf[3] = (state.lt >> 8) as u8;
    buf[4] = (state.rt >> 8) as u8;
    buf[5..7].copy_from_slice(&state.lx.to_le_bytes());
    buf[7..9].copy_from_slice(&state.ly.to_le_bytes());
    buf[9..11].copy_from_slice(&state.rx.to_le_bytes());
    buf[11..13].copy_from_slice(&state.ry.to_le_bytes());
    Report { buf, len: XBOX_REPORT_LEN }
}

/// PlayStation-style layout: report ID, four 8-bit stick axes, trigger top
/// bytes, buttons LE. Shared by the DualShock 4 and DualSense kinds.
fn encode_playstation(state: &PadState) -> Report {
    let mut buf = [0u8; MAX_REPORT_LEN];
    buf[0] = REPORT_ID;
    buf[1] = axis_to_u8(state.lx);
    buf[2] = axis_to_u8(state.ly);
    buf[3] = axis_to_u8(state.rx);
    buf[4] = axis_to_u8(state.ry);
    buf[5] = (state.lt >> 8) as u8;
    buf[6] = (state.rt >> 8) as u8;
    buf[7..9].copy_from_slice(&state.buttons.to_le_bytes());
    Report { buf, len: PS_REPORT_LEN }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary_state() -> PadState {
        PadState {
            buttons: 0xFFFF,
            lx: -32768,
            ly: 32767,
            rx: 0,
            ry: 0,
            lt: 65535,
            rt: 0,
        }
    }

    #[test]
    fn xbox_boundary_vector() {
        let report = encode(DeviceKind::Xbox360, &boundary_state());
        assert_eq!(
            report.as_bytes(),
            &[
                0x01, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x80, 0xFF, 0x7F, 0x00,
                0x00, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn playstation_boundary_vector() {
        let report = encode(DeviceKind::DualShock4, &boundary_state());
        assert_eq!(
            report.as_bytes(),
            &[0x01, 0x00, 0xFF, 0x80, 0x80, 0xFF, 0x00, 0xFF, 0xFF]
        );
    }

    #[test]
    fn dualsense_layout_matches_dualshock4() {
        let state = PadState {
            buttons: 0x1234,
            lx: -1,
            ly: 1,
            rx: 0x7F00,
            ry: -0x8000,
            lt: 0x8000,
            rt: 0x00FF,
        };
        assert_eq!(
            encode(DeviceKind::DualShock4, &state),
            encode(DeviceKind::DualSense, &state)
        );
    }

    #[test]
    fn axis_remap_centers_at_128() {
        assert_eq!(axis_to_u8(0), 128);
        assert_eq!(axis_to_u8(i16::MIN), 0);
        assert_eq!(axis_to_u8(i16::MAX), 255);
        assert_eq!(axis_to_u8(-256), 127);
    }

    #[test]
    fn trigger_downscale_keeps_top_byte_only() {
        let state = PadState { lt: 0x12FF, rt: 0x00FF, ..PadState::default() };
        let report = encode(DeviceKind::Xbox360, &state);
        assert_eq!(report.as_bytes()[3], 0x12);
        assert_eq!(report.as_bytes()[4], 0x00);
    }

    #[test]
    fn empty_report_has_no_bytes() {
        let report = Report::empty();
        assert!(report.is_empty());
        assert_eq!(report.as_bytes(), &[] as &[u8]);
    }
}
