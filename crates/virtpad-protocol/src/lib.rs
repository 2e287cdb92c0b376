//! Command ABI and HID report encoding for the VirtPad virtual
//! game-controller bus.
//!
//! This crate is the shared language between the bus core and its callers:
//!
//! - [`state`]: the abstract [`PadState`] snapshot every controller kind
//!   consumes
//! - [`kind`]: the closed set of emulated controller kinds with their USB
//!   identity and static report descriptors
//! - [`wire`]: fixed-size command structures, control codes, and checked
//!   decoding
//! - [`report`]: the pure per-kind report encoder
//! - [`ids`]: USB identity constants
//! - [`descriptors`]: static HID report descriptor tables
//!
//! Everything here is I/O-free and deterministic. Both sides of the wire
//! protocol must agree on these layouts out-of-band; nothing is negotiated
//! at runtime.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod descriptors;
pub mod ids;
pub mod kind;
pub mod report;
pub mod state;
pub mod wire;

pub use kind::{DeviceKind, Features, KindIdentity};
pub use report::{MAX_REPORT_LEN, PS_REPORT_LEN, Report, XBOX_REPORT_LEN, encode};
pub use state::{PAD_STATE_LEN, PadState};
pub use wire::{
    CreateRequest, CreateResponse, DestroyRequest, UpdateRequest, WireError,
};

/// Version of the command ABI. Bumped on any incompatible layout change.
pub const ABI_VERSION: u32 = 1;
