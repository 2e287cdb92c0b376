//! Command decode and routing.
//!
//! One `dispatch` call handles one command buffer end to end: select the
//! operation by control code, validate buffer lengths, decode the fixed
//! wire structure, run the registry operation, and write any output. The
//! create path checks output capacity before touching the registry, so a
//! too-small output buffer can never leave a device behind.

use tracing::warn;
use virtpad_protocol::wire::{
    CREATE_RESPONSE_LEN, CreateRequest, CreateResponse, DestroyRequest,
    IOCTL_VIRTPAD_CREATE, IOCTL_VIRTPAD_DESTROY, IOCTL_VIRTPAD_UPDATE, UpdateRequest,
};
use virtpad_protocol::{DeviceKind, Features};

use crate::error::{BusError, BusResult};
use crate::registry::DeviceRegistry;

/// The three bus operations, keyed by control code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Create,
    Update,
    Destroy,
}

impl Opcode {
    /// Resolve a raw control code; `None` for anything unrecognized.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            IOCTL_VIRTPAD_CREATE => Some(Opcode::Create),
            IOCTL_VIRTPAD_UPDATE => Some(Opcode::Update),
            IOCTL_VIRTPAD_DESTROY => Some(Opcode::Destroy),
            _ => None,
        }
    }

    /// The control code this operation answers to.
    pub fn code(self) -> u32 {
        match self {
            Opcode::Create => IOCTL_VIRTPAD_CREATE,
            Opcode::Update => IOCTL_VIRTPAD_UPDATE,
            Opcode::Destroy => IOCTL_VIRTPAD_DESTROY,
        }
    }
}

/// Entry point of the command protocol.
pub struct Dispatcher {
    registry: DeviceRegistry,
}

impl Dispatcher {
    pub fn new(registry: DeviceRegistry) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher routes into.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Execute one command. Returns the number of bytes written to
    /// `output` (zero for update and destroy).
    pub fn dispatch(&self, code: u32, input: &[u8], output: &mut [u8]) -> BusResult<usize> {
        let opcode = match Opcode::from_code(code) {
            Some(op) => op,
            None => {
                warn!(code = format_args!("{code:#010x}"), "unrecognized control code");
                return Err(BusError::InvalidRequest(code));
            }
        };
        match opcode {
            Opcode::Create => self.create(input, output),
            Opcode::Update => self.update(input).map(|()| 0),
            Opcode::Destroy => self.destroy(input).map(|()| 0),
        }
    }

    fn create(&self, input: &[u8], output: &mut [u8]) -> BusResult<usize> {
        let request = CreateRequest::decode(input)?;
        // Output capacity is checked before the kind, and the kind before
        // any side effect.
        if output.len() < CREATE_RESPONSE_LEN {
            return Err(BusError::BufferTooSmall {
                expected: CREATE_RESPONSE_LEN,
                actual: output.len(),
            });
        }
        let kind = DeviceKind::try_from(request.kind)?;
        let features = Features::from_bits_retain(request.features);

        let handle = self.registry.create(kind, features)?;
        let written = CreateResponse { handle }.write_to(output)?;
        Ok(written)
    }

    fn update(&self, input: &[u8]) -> BusResult<()> {
        let request = UpdateRequest::decode(input)?;
        self.registry.update(request.handle, &request.state)
    }

    fn destroy(&self, input: &[u8]) -> BusResult<()> {
        let request = DestroyRequest::decode(input)?;
        self.registry.destroy(request.handle)
    }
}
