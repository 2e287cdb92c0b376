//! padctl - VirtPad bus exerciser
//!
//! Inspect the supported controller kinds, encode single reports, and run
//! full create/update/destroy cycles against an in-memory adapter. Every
//! command drives the bus through the same wire protocol a real client
//! would use.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use virtpad_bus::adapter::mock::MockAdapter;
use virtpad_bus::{DeviceRegistry, Dispatcher};
use virtpad_protocol::wire::{
    CreateRequest, CreateResponse, DestroyRequest, IOCTL_VIRTPAD_CREATE,
    IOCTL_VIRTPAD_DESTROY, IOCTL_VIRTPAD_UPDATE, UpdateRequest,
};
use virtpad_protocol::{DeviceKind, PadState, encode};

#[derive(Parser)]
#[command(name = "padctl")]
#[command(about = "VirtPad bus exerciser - inspect kinds, encode reports, run device cycles")]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Controller kind as a CLI argument.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Xbox360,
    Dualshock4,
    Dualsense,
}

impl From<KindArg> for DeviceKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Xbox360 => DeviceKind::Xbox360,
            KindArg::Dualshock4 => DeviceKind::DualShock4,
            KindArg::Dualsense => DeviceKind::DualSense,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported controller kinds and their identities
    Kinds,

    /// Encode one input report and print it as hex
    Encode {
        /// Controller kind to encode for
        #[arg(value_enum)]
        kind: KindArg,

        /// Button bitmask
        #[arg(long, default_value_t = 0)]
        buttons: u16,

        /// Left stick X axis
        #[arg(long, default_value_t = 0)]
        lx: i16,

        /// Left stick Y axis
        #[arg(long, default_value_t = 0)]
        ly: i16,

        /// Right stick X axis
        #[arg(long, default_value_t = 0)]
        rx: i16,

        /// Right stick Y axis
        #[arg(long, default_value_t = 0)]
        ry: i16,

        /// Left trigger
        #[arg(long, default_value_t = 0)]
        lt: u16,

        /// Right trigger
        #[arg(long, default_value_t = 0)]
        rt: u16,
    },

    /// Create devices, push reports, and destroy them again
    Demo {
        /// Controller kind to create
        #[arg(value_enum, default_value = "xbox360")]
        kind: KindArg,

        /// Number of devices to create
        #[arg(long, default_value_t = 1)]
        count: u32,

        /// Input reports to push per device
        #[arg(long, default_value_t = 4)]
        frames: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("padctl={log_level},virtpad_bus={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Kinds => kinds(),
        Commands::Encode { kind, buttons, lx, ly, rx, ry, lt, rt } => {
            let state = PadState { buttons, lx, ly, rx, ry, lt, rt };
            encode_one(kind.into(), &state)
        }
        Commands::Demo { kind, count, frames } => demo(kind.into(), count, frames),
    }
}

fn kinds() -> Result<()> {
    println!("{:<12} {:>8} {:>6} {:>6} {:>8} {:>11}", "KIND", "CODE", "VID", "PID", "VERSION", "REPORT LEN");
    for kind in DeviceKind::ALL {
        let id = kind.identity();
        println!(
            "{:<12} {:>#8x} {:>#6x} {:>#6x} {:>#8x} {:>11}",
            kind.name(),
            kind.code(),
            id.vendor_id,
            id.product_id,
            id.version,
            kind.report_len(),
        );
    }
    Ok(())
}

fn encode_one(kind: DeviceKind, state: &PadState) -> Result<()> {
    let report = encode(kind, state);
    println!("{} ({} bytes): {}", kind.name(), report.len(), hex(report.as_bytes()));
    Ok(())
}

fn demo(kind: DeviceKind, count: u32, frames: u32) -> Result<()> {
    if count == 0 {
        bail!("count must be at least 1");
    }

    let adapter = Arc::new(MockAdapter::new());
    let dispatcher = Dispatcher::new(DeviceRegistry::new(adapter.clone()));

    let mut handles = Vec::new();
    for _ in 0..count {
        let input = CreateRequest { kind: kind.code(), features: 0 }.to_le_bytes();
        let mut output = [0u8; 8];
        dispatcher
            .dispatch(IOCTL_VIRTPAD_CREATE, &input, &mut output)
            .context("create failed")?;
        let handle = CreateResponse::decode(&output)
            .context("create response failed to decode")?
            .handle;
        info!(handle, kind = kind.name(), "created");
        handles.push(handle);
    }

    for &handle in &handles {
        for frame in 0..frames {
            let state = sweep_state(frame);
            let input = UpdateRequest { handle, state }.to_le_bytes();
            dispatcher
                .dispatch(IOCTL_VIRTPAD_UPDATE, &input, &mut [])
                .with_context(|| format!("update of handle {handle} failed"))?;
        }
    }

    for (submitted_handle, bytes) in adapter.submitted_reports() {
        println!("handle {submitted_handle}: {}", hex(&bytes));
    }

    for &handle in &handles {
        let input = DestroyRequest { handle }.to_le_bytes();
        dispatcher
            .dispatch(IOCTL_VIRTPAD_DESTROY, &input, &mut [])
            .with_context(|| format!("destroy of handle {handle} failed"))?;
        info!(handle, "destroyed");
    }

    println!(
        "{} device(s), {} report(s) each, {} live after teardown",
        count,
        frames,
        dispatcher.registry().device_count(),
    );
    Ok(())
}

/// Deterministic per-frame state so demo output is reproducible.
fn sweep_state(frame: u32) -> PadState {
    let step = (frame % 8) as i16;
    PadState {
        buttons: 1u16 << (frame % 16),
        lx: step * 4096,
        ly: -step * 4096,
        rx: step * 2048,
        ry: -step * 2048,
        lt: (frame % 2) as u16 * 0xFFFF,
        rt: 0,
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
