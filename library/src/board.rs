//! Register protocol for the 4I4O board.
//!
//! The chip exposes three byte-wide registers. The config register
//! programs port direction; writing [`CONFIG_VALUE`] makes the low
//! nibble relay outputs and the high nibble digital inputs. The input
//! register reports both nibbles in one byte: inputs on top, the
//! relay drive state echoed back on the bottom.

use crate::bus::Bus;
use crate::{Error, IndexKind, Result};
use tracing::debug;

/// Input/read register: input states in the high nibble, relay echo
/// in the low nibble.
pub const INPUT_REGISTER: u8 = 0x00;
/// Output/write register: relay bits 0..=3. Bits 4..=7 are never
/// asserted by this driver.
pub const OUTPUT_REGISTER: u8 = 0x01;
/// Port direction configuration register.
pub const CONFIG_REGISTER: u8 = 0x03;
/// Direction word: low nibble outputs, high nibble inputs.
pub const CONFIG_VALUE: u8 = 0xF0;
/// Factory-default chip address.
pub const DEFAULT_ADDRESS: u8 = 0x3F;

/// Drive state of one relay.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelayState {
    Off = 0,
    On = 1,
}

fn bit_for(kind: IndexKind, index: u8) -> Result<u8> {
    if (1..=4).contains(&index) {
        Ok(index - 1)
    } else {
        Err(Error::InvalidIndex { kind, index })
    }
}

/// One 4I4O board at a fixed chip address, driven through a borrowed
/// [`Bus`] handle.
pub struct IoBoard<'a, B: Bus> {
    bus: &'a mut B,
    address: u8,
}

impl<'a, B: Bus> IoBoard<'a, B> {
    pub fn new(bus: &'a mut B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Whether the config register already holds [`CONFIG_VALUE`].
    ///
    /// A read failure propagates; it is never reported as "not
    /// initialized".
    pub fn is_initialized(&mut self) -> Result<bool> {
        let cfg = self.bus.read_byte(self.address, CONFIG_REGISTER)?;
        Ok(cfg == CONFIG_VALUE)
    }

    /// Program port direction and de-energize all relays.
    ///
    /// Two sequential writes; if the second fails the chip is left
    /// with direction programmed but relays untouched. Safe to call
    /// on an already-initialized board.
    pub fn initialize(&mut self) -> Result<()> {
        debug!(address = self.address, "initializing board");
        self.bus
            .write_byte(self.address, CONFIG_REGISTER, CONFIG_VALUE)?;
        self.bus.write_byte(self.address, OUTPUT_REGISTER, 0x00)?;
        Ok(())
    }

    /// Read one digital input, returning `0` or `1`.
    ///
    /// Reads the input register once and extracts the requested bit
    /// from the high nibble, so all four inputs come from a single
    /// snapshot.
    pub fn read_input(&mut self, input: u8) -> Result<u8> {
        let bit = bit_for(IndexKind::Input, input)?;
        let raw = self.bus.read_byte(self.address, INPUT_REGISTER)?;
        let inputs = raw >> 4;
        Ok((inputs & (1 << bit)) >> bit)
    }

    /// Energize or de-energize one relay, leaving the other three
    /// exactly as they were.
    ///
    /// Read-modify-write: the current relay state is taken from the
    /// input register's low nibble (the device echoes its own drive
    /// state there), one bit is set or cleared, and the full nibble
    /// goes back out through the output register. Not safe against a
    /// second process writing the same chip between the read and the
    /// write.
    pub fn set_relay(&mut self, relay: u8, state: RelayState) -> Result<()> {
        let bit = bit_for(IndexKind::Relay, relay)?;
        let current = self.bus.read_byte(self.address, INPUT_REGISTER)? & 0x0F;
        let next = match state {
            RelayState::On => current | (1 << bit),
            RelayState::Off => current & (0x0F ^ (1 << bit)),
        };
        debug!(relay, ?state, current, next, "switching relay");
        self.bus.write_byte(self.address, OUTPUT_REGISTER, next)
    }
}
