//! USB identity constants for the emulated controller kinds.
//!
//! The vendor/product/version triples below are the identities the bus
//! registers with the virtual HID adapter, so the emulated devices enumerate
//! exactly like their physical counterparts. All values are from the USB ID
//! database and match what the real hardware reports in its device
//! descriptor.

/// Microsoft Corp. USB Vendor ID.
pub const MICROSOFT_VENDOR_ID: u16 = 0x045E;

/// Sony Corp. USB Vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

/// USB product IDs of the emulated devices.
pub mod product_ids {
    /// Xbox 360 wired controller.
    pub const XBOX360_PAD: u16 = 0x028E;
    /// DualShock 4 (CUH-ZCT1x revision).
    pub const DUALSHOCK4: u16 = 0x05C4;
    /// DualSense wireless controller.
    pub const DUALSENSE: u16 = 0x0CE6;
}

/// bcdDevice revision numbers reported by the emulated devices.
pub mod versions {
    pub const XBOX360_PAD: u16 = 0x0114;
    pub const DUALSHOCK4: u16 = 0x0100;
    pub const DUALSENSE: u16 = 0x0100;
}

/// Canonical wire discriminants for [`DeviceKind`](crate::DeviceKind).
///
/// These are the values callers put in the `kind` field of a create
/// request. They deliberately track the PlayStation product IDs (and the
/// historical 0x0366 value for the Xbox-style pad) rather than a dense
/// 0..N range; the counterpart user-mode component ships the same table.
pub mod kind_codes {
    pub const XBOX360: u32 = 0x0366;
    pub const DUALSHOCK4: u32 = 0x05C4;
    pub const DUALSENSE: u32 = 0x0CE6;
}
