//! Live-device table and lifecycle.
//!
//! The registry owns every virtual device and is the only shared mutable
//! state in the bus: one lock guards the device map together with the
//! handle counter, so handle assignment and insertion are a single atomic
//! step. Adapter calls (create, start, submit, delete) never run under the
//! lock; the lock covers only map mutation and report encoding.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use virtpad_protocol::{DeviceKind, Features, PadState, Report, encode};

use crate::adapter::{AdapterConfig, AdapterHandle, EagerPushEvents, VhidAdapter};
use crate::error::{BusError, BusResult};

/// One live virtual device.
struct VirtualDevice {
    kind: DeviceKind,
    features: Features,
    adapter_handle: AdapterHandle,
    /// Most recently encoded report; rewritten in place on every update.
    last_report: Report,
}

/// Read-only view of one live device, for introspection and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceSnapshot {
    pub handle: u64,
    pub kind: DeviceKind,
    pub features: Features,
}

struct RegistryInner {
    devices: HashMap<u64, VirtualDevice>,
    /// Next handle to assign; monotonically increasing, never reused.
    next_handle: u64,
}

/// Table of live virtual devices, backed by one adapter.
pub struct DeviceRegistry {
    adapter: Arc<dyn VhidAdapter>,
    inner: Mutex<RegistryInner>,
}

/// Deletes an adapter device on drop unless released. Covers the window
/// between a successful adapter create and registry insertion, so a
/// failure on that path cannot leak the adapter resource.
struct AdapterGuard<'a> {
    adapter: &'a dyn VhidAdapter,
    handle: AdapterHandle,
    armed: bool,
}

impl<'a> AdapterGuard<'a> {
    fn new(adapter: &'a dyn VhidAdapter, handle: AdapterHandle) -> Self {
        Self { adapter, handle, armed: true }
    }

    fn release(mut self) -> AdapterHandle {
        self.armed = false;
        self.handle
    }
}

impl Drop for AdapterGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.adapter.delete(self.handle, false);
        }
    }
}

impl DeviceRegistry {
    pub fn new(adapter: Arc<dyn VhidAdapter>) -> Self {
        Self {
            adapter,
            inner: Mutex::new(RegistryInner { devices: HashMap::new(), next_handle: 1 }),
        }
    }

    /// Create and start one virtual device of `kind`, returning its bus
    /// handle. On any failure nothing is registered and the adapter
    /// resource, if it was created, is deleted before returning.
    pub fn create(&self, kind: DeviceKind, features: Features) -> BusResult<u64> {
        let identity = kind.identity();
        let config = AdapterConfig {
            report_descriptor: kind.report_descriptor(),
            vendor_id: identity.vendor_id,
            product_id: identity.product_id,
            version: identity.version,
            events: Arc::new(EagerPushEvents),
        };

        let adapter_handle = self.adapter.create(&config)?;
        let guard = AdapterGuard::new(self.adapter.as_ref(), adapter_handle);
        self.adapter.start(adapter_handle)?;
        let adapter_handle = guard.release();

        let handle = {
            let mut inner = self.inner.lock();
            let handle = inner.next_handle;
            inner.next_handle += 1;
            inner.devices.insert(
                handle,
                VirtualDevice {
                    kind,
                    features,
                    adapter_handle,
                    last_report: Report::empty(),
                },
            );
            handle
        };

        info!(
            handle,
            kind = kind.name(),
            features = features.bits(),
            vendor_id = format_args!("{:#06x}", identity.vendor_id),
            product_id = format_args!("{:#06x}", identity.product_id),
            "virtual device created"
        );
        Ok(handle)
    }

    /// Encode `state` for the device's kind and push the report to the
    /// adapter. Encoding happens under the lock (it also refreshes the
    /// device's last-report scratch); the submit happens outside it.
    pub fn update(&self, handle: u64, state: &PadState) -> BusResult<()> {
        let (adapter_handle, report) = {
            let mut inner = self.inner.lock();
            let device = inner
                .devices
                .get_mut(&handle)
                .ok_or(BusError::InvalidHandle(handle))?;
            device.last_report = encode(device.kind, state);
            (device.adapter_handle, device.last_report)
        };

        debug!(handle, len = report.len(), "submitting input report");
        // A destroy may have won the race since the lookup; the adapter's
        // unknown-handle error surfaces to the caller unchanged.
        self.adapter.submit_report(adapter_handle, report.as_bytes())?;
        Ok(())
    }

    /// Remove the device from the table, then delete its adapter resource.
    /// The adapter delete happens exactly once, outside the lock.
    pub fn destroy(&self, handle: u64) -> BusResult<()> {
        let device = {
            let mut inner = self.inner.lock();
            inner
                .devices
                .remove(&handle)
                .ok_or(BusError::InvalidHandle(handle))?
        };

        self.adapter.delete(device.adapter_handle, true);
        info!(handle, kind = device.kind.name(), "virtual device destroyed");
        Ok(())
    }

    /// Destroy every live device. Used on shutdown of the owning process.
    pub fn destroy_all(&self) {
        let devices: Vec<(u64, VirtualDevice)> = {
            let mut inner = self.inner.lock();
            inner.devices.drain().collect()
        };
        if devices.is_empty() {
            return;
        }
        warn!(count = devices.len(), "destroying all remaining devices");
        for (handle, device) in devices {
            self.adapter.delete(device.adapter_handle, true);
            info!(handle, kind = device.kind.name(), "virtual device destroyed");
        }
    }

    /// Snapshot of one live device.
    pub fn snapshot(&self, handle: u64) -> Option<DeviceSnapshot> {
        let inner = self.inner.lock();
        inner.devices.get(&handle).map(|device| DeviceSnapshot {
            handle,
            kind: device.kind,
            features: device.features,
        })
    }

    /// Number of live devices.
    pub fn device_count(&self) -> usize {
        self.inner.lock().devices.len()
    }

    /// The handle the next successful create will return.
    pub fn peek_next_handle(&self) -> u64 {
        self.inner.lock().next_handle
    }
}
