//! Linux `/dev/i2c-*` transport built on `i2cdev` SMBus byte-data
//! transfers.

use crate::bus::Bus;
use crate::{Error, Result};
use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;
use std::path::Path;
use tracing::info;

/// Exclusively-owned handle to one I2C character device.
///
/// The kernel binds one slave address per file descriptor; the handle
/// re-selects the address when an operation targets a different chip.
pub struct LinuxBus {
    dev: Option<LinuxI2CDevice>,
    selected: u8,
}

fn open_i2c(path: &Path, address: u8) -> Result<LinuxI2CDevice> {
    if let Ok(dev) = LinuxI2CDevice::new(path, address.into()) {
        return Ok(dev);
    }
    info!("safe open failed, forcing open of {}", path.display());
    unsafe { LinuxI2CDevice::force_new(path, address.into()) }
        .map_err(|e| Error::Bus(e.to_string()))
}

impl LinuxBus {
    /// Open the device node at `path` with `address` pre-selected.
    pub fn open<P: AsRef<Path>>(path: P, address: u8) -> Result<Self> {
        let dev = open_i2c(path.as_ref(), address)?;
        Ok(Self {
            dev: Some(dev),
            selected: address,
        })
    }

    fn select(&mut self, address: u8) -> Result<()> {
        if address != self.selected {
            let dev = self.dev.as_mut().ok_or(Error::BusClosed)?;
            dev.set_slave_address(address.into())
                .map_err(|e| Error::Bus(e.to_string()))?;
            self.selected = address;
        }
        Ok(())
    }
}

impl Bus for LinuxBus {
    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8> {
        self.select(address)?;
        self.dev
            .as_mut()
            .ok_or(Error::BusClosed)?
            .smbus_read_byte_data(register)
            .map_err(|e| Error::Bus(e.to_string()))
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<()> {
        self.select(address)?;
        self.dev
            .as_mut()
            .ok_or(Error::BusClosed)?
            .smbus_write_byte_data(register, value)
            .map_err(|e| Error::Bus(e.to_string()))
    }

    fn close(&mut self) -> Result<()> {
        self.dev.take();
        Ok(())
    }
}
