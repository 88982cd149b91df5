//! Byte-register bus capability consumed by the protocol layer.

use crate::{Error, Result};
use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Single-byte register access to an addressable device.
///
/// One blocking transaction per call, no retries. `close` releases the
/// underlying handle and must be idempotent; operations after `close`
/// fail with [`Error::BusClosed`].
pub trait Bus {
    /// Read one byte from `register` of the device at `address`.
    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8>;

    /// Write one byte to `register` of the device at `address`.
    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<()>;

    /// Release the bus handle. Safe to call more than once.
    fn close(&mut self) -> Result<()>;
}

/// Adapter exposing any blocking `embedded-hal` I2C implementation as
/// a [`Bus`].
///
/// Register reads use a write-then-read transaction (register pointer,
/// then data); writes send `[register, value]` in one transfer.
pub struct HalBus<T> {
    inner: T,
}

impl<T> HalBus<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Hand back the wrapped I2C implementation.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: I2c<SevenBitAddress>> Bus for HalBus<T> {
    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.inner
            .write_read(address, &[register], &mut buf)
            .map_err(|e| Error::Bus(format!("{e:?}")))?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<()> {
        self.inner
            .write(address, &[register, value])
            .map_err(|e| Error::Bus(format!("{e:?}")))
    }

    fn close(&mut self) -> Result<()> {
        // Nothing to release; the wrapped implementation owns its handle.
        Ok(())
    }
}
