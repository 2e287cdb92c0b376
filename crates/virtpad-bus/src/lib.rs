//! Core of the VirtPad virtual game-controller bus.
//!
//! The bus accepts fixed-size binary commands, maintains the table of live
//! virtual devices, and pushes encoded HID input reports into a virtual
//! HID adapter. It is fully synchronous: every operation runs to
//! completion on the caller's thread, and the only shared mutable state is
//! the registry's device table behind one lock.
//!
//! # Architecture
//!
//! - [`dispatch`]: decodes and routes one command buffer per call
//! - [`registry`]: owns the live devices and assigns unique handles
//! - [`adapter`]: the virtual HID adapter contract plus a test mock
//! - [`error`]: the bus error taxonomy
//!
//! Data flow: dispatcher → registry (create/find/destroy) → adapter
//! (create/start/submit/delete); the update path is dispatcher →
//! registry lookup → report encoder → adapter submit.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod adapter;
pub mod dispatch;
pub mod error;
pub mod registry;

pub use adapter::{
    AdapterConfig, AdapterError, AdapterEvents, AdapterHandle, VhidAdapter,
};
pub use dispatch::{Dispatcher, Opcode};
pub use error::{BusError, BusResult};
pub use registry::{DeviceRegistry, DeviceSnapshot};
