//! Host-side driver for the EBIOXP 4I4O I/O board: four relay outputs
//! and four digital inputs behind a byte-wide I2C register triplet.
//!
//! The [`board::IoBoard`] type owns all register semantics; it talks to
//! the chip through the [`bus::Bus`] capability, so the same protocol
//! code runs against a real `/dev/i2c-*` node ([`linux::LinuxBus`]),
//! any `embedded-hal` I2C implementation ([`bus::HalBus`]), or a test
//! fixture.

use std::fmt;
use thiserror::Error;

pub mod board;
pub mod bus;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub mod linux;

pub use board::{IoBoard, RelayState, DEFAULT_ADDRESS};
pub use bus::{Bus, HalBus};
#[cfg(any(target_os = "linux", target_os = "android"))]
pub use linux::LinuxBus;

/// Which index parameter was out of range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexKind {
    Relay,
    Input,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Relay => write!(f, "relay"),
            IndexKind::Input => write!(f, "digital input"),
        }
    }
}

#[derive(Error, Clone, Debug)]
pub enum Error {
    /// Transport or device failure on a register read or write.
    #[error("bus error: {0}")]
    Bus(String),
    /// The bus handle was already released with [`Bus::close`].
    #[error("bus handle is closed")]
    BusClosed,
    /// Relay or input index outside the board's 1..=4 range.
    #[error("invalid {kind} number {index}, expected 1..=4")]
    InvalidIndex { kind: IndexKind, index: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
