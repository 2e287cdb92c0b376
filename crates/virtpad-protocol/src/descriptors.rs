//! Static HID report descriptor tables.
//!
//! One fixed descriptor per controller kind, registered with the virtual
//! HID adapter at device creation and never changed for the device's
//! lifetime. The tables describe exactly the input report layouts produced
//! by [`report`](crate::report): the bus never parses these back, and the
//! consuming HID stack is the only reader.

/// Report descriptor for the Xbox-style pad: 16 buttons, two 8-bit
/// triggers, four 16-bit stick axes, all behind report ID 1.
pub const XBOX360_REPORT_DESCRIPTOR: [u8; 62] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (1)
    0x29, 0x10, //   Usage Maximum (16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x10, //   Report Count (16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x32, //   Usage (Z)  -- left trigger
    0x09, 0x35, //   Usage (Rz) -- right trigger
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x33, //   Usage (Rx)
    0x09, 0x34, //   Usage (Ry)
    0x16, 0x00, 0x80, //   Logical Minimum (-32768)
    0x26, 0xFF, 0x7F, //   Logical Maximum (32767)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0xC0, // End Collection
];

/// Report descriptor shared by both PlayStation-style pads: four 8-bit
/// stick axes, two 8-bit triggers, 16 buttons, behind report ID 1. The
/// DualShock 4 and DualSense kinds differ only in USB identity, not in
/// report layout.
pub const PLAYSTATION_REPORT_DESCRIPTOR: [u8; 59] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)  -- right stick X
    0x09, 0x35, //   Usage (Rz) -- right stick Y
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x09, 0x33, //   Usage (Rx) -- left trigger
    0x09, 0x34, //   Usage (Ry) -- right trigger
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (1)
    0x29, 0x10, //   Usage Maximum (16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x10, //   Report Count (16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_are_wellformed_collections() {
        // Spot checks only; the bus does not parse descriptors.
        for desc in [&XBOX360_REPORT_DESCRIPTOR[..], &PLAYSTATION_REPORT_DESCRIPTOR[..]] {
            assert_eq!(&desc[0..2], &[0x05, 0x01], "must open with Generic Desktop");
            assert_eq!(desc[desc.len() - 1], 0xC0, "must close the collection");
        }
    }
}
