//! HalBus adapter tests against a fake embedded-hal I2C device.

use ebioxp::board::{CONFIG_VALUE, INPUT_REGISTER, OUTPUT_REGISTER};
use ebioxp::{Bus, HalBus, IoBoard, RelayState, DEFAULT_ADDRESS};
use embedded_hal::i2c::{self, ErrorType, I2c, Operation, SevenBitAddress};

#[derive(Debug)]
struct FakeI2cError;

impl i2c::Error for FakeI2cError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::Other
    }
}

/// Register-pointer I2C slave with the 4I4O echo behavior: reads of
/// register 0 return input bits on top of the output nibble.
struct FakeSlave {
    regs: [u8; 4],
    pointer: u8,
}

impl FakeSlave {
    fn new() -> Self {
        Self {
            regs: [0; 4],
            pointer: 0,
        }
    }
}

impl ErrorType for FakeSlave {
    type Error = FakeI2cError;
}

impl I2c<SevenBitAddress> for FakeSlave {
    fn transaction(
        &mut self,
        _address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(data) => match **data {
                    [register] => self.pointer = register,
                    [register, value] => {
                        if usize::from(register) >= self.regs.len() {
                            return Err(FakeI2cError);
                        }
                        self.pointer = register;
                        self.regs[usize::from(register)] = value;
                    }
                    _ => return Err(FakeI2cError),
                },
                Operation::Read(buf) => {
                    if buf.len() != 1 || usize::from(self.pointer) >= self.regs.len() {
                        return Err(FakeI2cError);
                    }
                    buf[0] = if self.pointer == INPUT_REGISTER {
                        (self.regs[usize::from(INPUT_REGISTER)] & 0xF0)
                            | (self.regs[usize::from(OUTPUT_REGISTER)] & 0x0F)
                    } else {
                        self.regs[usize::from(self.pointer)]
                    };
                }
            }
        }
        Ok(())
    }
}

#[test]
fn read_byte_uses_register_pointer() {
    let mut slave = FakeSlave::new();
    slave.regs[3] = 0x5A;
    let mut bus = HalBus::new(slave);
    assert_eq!(bus.read_byte(DEFAULT_ADDRESS, 0x03).unwrap(), 0x5A);
}

#[test]
fn write_byte_sends_register_then_value() {
    let mut bus = HalBus::new(FakeSlave::new());
    bus.write_byte(DEFAULT_ADDRESS, 0x01, 0x0C).unwrap();
    assert_eq!(bus.into_inner().regs[1], 0x0C);
}

#[test]
fn close_is_idempotent() {
    let mut bus = HalBus::new(FakeSlave::new());
    bus.close().unwrap();
    bus.close().unwrap();
}

#[test]
fn full_board_session_over_hal_bus() {
    let mut bus = HalBus::new(FakeSlave::new());
    let mut board = IoBoard::new(&mut bus, DEFAULT_ADDRESS);

    assert!(!board.is_initialized().unwrap());
    board.initialize().unwrap();
    assert!(board.is_initialized().unwrap());

    board.set_relay(2, RelayState::On).unwrap();
    board.set_relay(4, RelayState::On).unwrap();
    board.set_relay(2, RelayState::Off).unwrap();

    let slave = bus.into_inner();
    assert_eq!(slave.regs[usize::from(OUTPUT_REGISTER)], 0x08);
    assert_eq!(slave.regs[3], CONFIG_VALUE);
}
