//! Virtual HID adapter contract.
//!
//! The adapter is the external service that turns a submitted report
//! buffer into an emulated input device event. The bus treats it as
//! opaque: it hands over a report descriptor and USB identity at creation,
//! starts the device, submits encoded reports, and deletes the device
//! exactly once on destroy. `submit_report` is synchronous and may fail
//! when the consumer side is not ready; the bus never retries.

use std::sync::Arc;

use thiserror::Error;

/// Opaque identifier for one adapter-side virtual device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdapterHandle(pub u64);

/// Adapter-side failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AdapterError {
    /// Device resource creation failed.
    #[error("adapter device creation failed: {0}")]
    CreateFailed(String),

    /// Device was created but could not be started.
    #[error("adapter device failed to start: {0}")]
    StartFailed(String),

    /// The consumer side is not ready to accept a report.
    #[error("report consumer not ready")]
    NotReady,

    /// Operation references an adapter handle that is not live.
    #[error("unknown adapter handle {0}")]
    UnknownHandle(u64),
}

/// Inbound callbacks the bus provides to the adapter.
pub trait AdapterEvents: Send + Sync {
    /// Consumer is ready for the next input report. The bus pushes
    /// reports eagerly rather than pulling, so the default does nothing.
    fn ready_for_next_report(&self) {}

    /// Feature/get-set report request from the consumer side.
    fn async_operation(&self, _packet: &[u8]) -> Result<(), AdapterError> {
        Ok(())
    }
}

/// The bus's callback sink: readiness ignored, async operations
/// acknowledged without side effects.
pub struct EagerPushEvents;

impl AdapterEvents for EagerPushEvents {}

/// Everything the adapter needs to bring up one virtual device.
pub struct AdapterConfig<'a> {
    pub report_descriptor: &'a [u8],
    pub vendor_id: u16,
    pub product_id: u16,
    pub version: u16,
    pub events: Arc<dyn AdapterEvents>,
}

/// Contract of the virtual HID adapter service.
pub trait VhidAdapter: Send + Sync {
    /// Create one virtual device from `config` and return its handle.
    fn create(&self, config: &AdapterConfig<'_>) -> Result<AdapterHandle, AdapterError>;

    /// Start a created device; the consumer side may begin reading.
    fn start(&self, handle: AdapterHandle) -> Result<(), AdapterError>;

    /// Push one encoded input report. Synchronous; no retry on failure.
    fn submit_report(&self, handle: AdapterHandle, report: &[u8]) -> Result<(), AdapterError>;

    /// Release all adapter-side resources for `handle`. Not assumed
    /// idempotent: the bus calls this exactly once per created handle.
    fn delete(&self, handle: AdapterHandle, surprise_removal: bool);
}

pub mod mock {
    //! In-memory adapter for tests and the CLI demo path.

    use std::collections::HashMap;

    use parking_lot::Mutex;

    use super::{AdapterConfig, AdapterError, AdapterHandle, VhidAdapter};

    /// One mock-side device record.
    #[derive(Clone, Debug)]
    pub struct MockDevice {
        pub vendor_id: u16,
        pub product_id: u16,
        pub version: u16,
        pub descriptor_len: usize,
        pub started: bool,
    }

    #[derive(Default)]
    struct MockInner {
        next: u64,
        live: HashMap<u64, MockDevice>,
        submitted: Vec<(u64, Vec<u8>)>,
        deleted: Vec<(u64, bool)>,
        unknown_deletes: u64,
        fail_create: bool,
        fail_start: bool,
        fail_submit: bool,
    }

    /// Records every adapter call and supports injected failures.
    #[derive(Default)]
    pub struct MockAdapter {
        inner: Mutex<MockInner>,
    }

    impl MockAdapter {
        pub fn new() -> Self {
            Self { inner: Mutex::new(MockInner { next: 1, ..MockInner::default() }) }
        }

        /// Make the next `create` calls fail.
        pub fn set_fail_create(&self, fail: bool) {
            self.inner.lock().fail_create = fail;
        }

        /// Make the next `start` calls fail.
        pub fn set_fail_start(&self, fail: bool) {
            self.inner.lock().fail_start = fail;
        }

        /// Make the next `submit_report` calls fail with `NotReady`.
        pub fn set_fail_submit(&self, fail: bool) {
            self.inner.lock().fail_submit = fail;
        }

        /// Number of live (created, not deleted) mock devices.
        pub fn live_count(&self) -> usize {
            self.inner.lock().live.len()
        }

        /// Identity recorded for a live device, if any.
        pub fn device(&self, handle: AdapterHandle) -> Option<MockDevice> {
            self.inner.lock().live.get(&handle.0).cloned()
        }

        /// All reports submitted so far, in order, with their handles.
        pub fn submitted_reports(&self) -> Vec<(u64, Vec<u8>)> {
            self.inner.lock().submitted.clone()
        }

        /// Reports submitted for one handle.
        pub fn reports_for(&self, handle: AdapterHandle) -> Vec<Vec<u8>> {
            self.inner
                .lock()
                .submitted
                .iter()
                .filter(|(h, _)| *h == handle.0)
                .map(|(_, bytes)| bytes.clone())
                .collect()
        }

        /// Every delete call observed, with its surprise-removal flag.
        pub fn deleted(&self) -> Vec<(u64, bool)> {
            self.inner.lock().deleted.clone()
        }

        /// Count of delete calls that referenced an unknown handle. The
        /// bus guarantees exactly-once deletion, so this must stay 0.
        pub fn unknown_delete_count(&self) -> u64 {
            self.inner.lock().unknown_deletes
        }
    }

    impl VhidAdapter for MockAdapter {
        fn create(&self, config: &AdapterConfig<'_>) -> Result<AdapterHandle, AdapterError> {
            let mut inner = self.inner.lock();
            if inner.fail_create {
                return Err(AdapterError::CreateFailed("injected create failure".to_string()));
            }
            let handle = inner.next;
            inner.next += 1;
            inner.live.insert(
                handle,
                MockDevice {
                    vendor_id: config.vendor_id,
                    product_id: config.product_id,
                    version: config.version,
                    descriptor_len: config.report_descriptor.len(),
                    started: false,
                },
            );
            Ok(AdapterHandle(handle))
        }

        fn start(&self, handle: AdapterHandle) -> Result<(), AdapterError> {
            let mut inner = self.inner.lock();
            if inner.fail_start {
                return Err(AdapterError::StartFailed("injected start failure".to_string()));
            }
            match inner.live.get_mut(&handle.0) {
                Some(device) => {
                    device.started = true;
                    Ok(())
                }
                None => Err(AdapterError::UnknownHandle(handle.0)),
            }
        }

        fn submit_report(
            &self,
            handle: AdapterHandle,
            report: &[u8],
        ) -> Result<(), AdapterError> {
            let mut inner = self.inner.lock();
            if !inner.live.contains_key(&handle.0) {
                return Err(AdapterError::UnknownHandle(handle.0));
            }
            if inner.fail_submit {
                return Err(AdapterError::NotReady);
            }
            inner.submitted.push((handle.0, report.to_vec()));
            Ok(())
        }

        fn delete(&self, handle: AdapterHandle, surprise_removal: bool) {
            let mut inner = self.inner.lock();
            if inner.live.remove(&handle.0).is_none() {
                inner.unknown_deletes += 1;
            }
            inner.deleted.push((handle.0, surprise_removal));
        }
    }

    #[cfg(test)]
    mod tests {
        use std::sync::Arc;

        use super::*;
        use crate::adapter::EagerPushEvents;

        fn config(descriptor: &[u8]) -> AdapterConfig<'_> {
            AdapterConfig {
                report_descriptor: descriptor,
                vendor_id: 0x045E,
                product_id: 0x028E,
                version: 0x0114,
                events: Arc::new(EagerPushEvents),
            }
        }

        #[test]
        fn create_start_submit_delete_cycle() {
            let mock = MockAdapter::new();
            let descriptor = [0x05u8, 0x01];
            let handle = match mock.create(&config(&descriptor)) {
                Ok(h) => h,
                Err(e) => panic!("mock create failed: {e}"),
            };
            assert!(mock.start(handle).is_ok());
            assert!(mock.submit_report(handle, &[1, 2, 3]).is_ok());
            assert_eq!(mock.reports_for(handle), vec![vec![1, 2, 3]]);

            mock.delete(handle, true);
            assert_eq!(mock.live_count(), 0);
            assert_eq!(mock.unknown_delete_count(), 0);
            assert_eq!(
                mock.submit_report(handle, &[4]),
                Err(AdapterError::UnknownHandle(handle.0))
            );
        }

        #[test]
        fn injected_failures_surface_as_adapter_errors() {
            let mock = MockAdapter::new();
            mock.set_fail_create(true);
            let err = mock.create(&config(&[]));
            assert!(matches!(err, Err(AdapterError::CreateFailed(_))));

            mock.set_fail_create(false);
            let handle = match mock.create(&config(&[])) {
                Ok(h) => h,
                Err(e) => panic!("mock create failed: {e}"),
            };
            mock.set_fail_submit(true);
            assert_eq!(mock.submit_report(handle, &[0]), Err(AdapterError::NotReady));
        }
    }
}
