//! Emulated controller kinds and their static identity.

use serde::{Deserialize, Serialize};

use crate::descriptors;
use crate::ids::{self, kind_codes, product_ids, versions};
use crate::report::{PS_REPORT_LEN, XBOX_REPORT_LEN};
use crate::wire::WireError;

/// The closed set of controller kinds the bus can emulate.
///
/// Every use site matches exhaustively so that adding a kind is a
/// compile-time event, not a silently ignored runtime value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Xbox-360-style pad: 16-bit sticks, 8-bit triggers.
    Xbox360,
    /// DualShock-4-style pad: 8-bit sticks and triggers.
    DualShock4,
    /// DualSense-style pad: identical report layout to [`DualShock4`],
    /// distinct USB identity.
    ///
    /// [`DualShock4`]: DeviceKind::DualShock4
    DualSense,
}

/// USB identity registered with the adapter for one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
    pub version: u16,
}

impl DeviceKind {
    /// All kinds, in wire-code order.
    pub const ALL: [DeviceKind; 3] =
        [DeviceKind::Xbox360, DeviceKind::DualShock4, DeviceKind::DualSense];

    /// Canonical wire discriminant (the `kind` field of a create request).
    pub fn code(self) -> u32 {
        match self {
            DeviceKind::Xbox360 => kind_codes::XBOX360,
            DeviceKind::DualShock4 => kind_codes::DUALSHOCK4,
            DeviceKind::DualSense => kind_codes::DUALSENSE,
        }
    }

    /// USB identity the adapter publishes for this kind.
    pub fn identity(self) -> KindIdentity {
        match self {
            DeviceKind::Xbox360 => KindIdentity {
                vendor_id: ids::MICROSOFT_VENDOR_ID,
                product_id: product_ids::XBOX360_PAD,
                version: versions::XBOX360_PAD,
            },
            DeviceKind::DualShock4 => KindIdentity {
                vendor_id: ids::SONY_VENDOR_ID,
                product_id: product_ids::DUALSHOCK4,
                version: versions::DUALSHOCK4,
            },
            DeviceKind::DualSense => KindIdentity {
                vendor_id: ids::SONY_VENDOR_ID,
                product_id: product_ids::DUALSENSE,
                version: versions::DUALSENSE,
            },
        }
    }

    /// Fixed HID report descriptor registered at device creation.
    pub fn report_descriptor(self) -> &'static [u8] {
        match self {
            DeviceKind::Xbox360 => &descriptors::XBOX360_REPORT_DESCRIPTOR,
            DeviceKind::DualShock4 | DeviceKind::DualSense => {
                &descriptors::PLAYSTATION_REPORT_DESCRIPTOR
            }
        }
    }

    /// Length in bytes of the input report this kind produces.
    pub fn report_len(self) -> usize {
        match self {
            DeviceKind::Xbox360 => XBOX_REPORT_LEN,
            DeviceKind::DualShock4 | DeviceKind::DualSense => PS_REPORT_LEN,
        }
    }

    /// Short human-readable name for logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            DeviceKind::Xbox360 => "xbox360",
            DeviceKind::DualShock4 => "dualshock4",
            DeviceKind::DualSense => "dualsense",
        }
    }
}

impl TryFrom<u32> for DeviceKind {
    type Error = WireError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            kind_codes::XBOX360 => Ok(DeviceKind::Xbox360),
            kind_codes::DUALSHOCK4 => Ok(DeviceKind::DualShock4),
            kind_codes::DUALSENSE => Ok(DeviceKind::DualSense),
            other => Err(WireError::InvalidKind(other)),
        }
    }
}

bitflags::bitflags! {
    /// Forward-compatibility feature flags accepted at device creation.
    ///
    /// The core stores and logs these but does not interpret them.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Features: u32 {
        const RUMBLE = 1 << 0;
        const TOUCH  = 1 << 1;
        const GYRO   = 1 << 2;
        const LED    = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_round_trip() {
        for kind in DeviceKind::ALL {
            assert_eq!(DeviceKind::try_from(kind.code()), Ok(kind));
        }
    }

    #[test]
    fn dense_legacy_codes_are_rejected() {
        // The 0/1/2 enumeration from an early ABI draft must not decode.
        for code in [0u32, 1, 2] {
            assert_eq!(
                DeviceKind::try_from(code),
                Err(WireError::InvalidKind(code))
            );
        }
    }

    #[test]
    fn playstation_kinds_share_a_descriptor() {
        assert_eq!(
            DeviceKind::DualShock4.report_descriptor(),
            DeviceKind::DualSense.report_descriptor()
        );
        assert_ne!(
            DeviceKind::Xbox360.report_descriptor(),
            DeviceKind::DualShock4.report_descriptor()
        );
    }

    #[test]
    fn identities_match_real_hardware() {
        let xbox = DeviceKind::Xbox360.identity();
        assert_eq!((xbox.vendor_id, xbox.product_id), (0x045E, 0x028E));

        let ds4 = DeviceKind::DualShock4.identity();
        assert_eq!((ds4.vendor_id, ds4.product_id), (0x054C, 0x05C4));

        let ds5 = DeviceKind::DualSense.identity();
        assert_eq!((ds5.vendor_id, ds5.product_id), (0x054C, 0x0CE6));
    }

    #[test]
    fn features_preserve_unknown_bits() {
        let features = Features::from_bits_retain(0xDEAD_BEEF);
        assert_eq!(features.bits(), 0xDEAD_BEEF);
    }
}
