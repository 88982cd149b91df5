use clap::{CommandFactory, Parser};
use color_eyre::Result;
use std::num::ParseIntError;

#[cfg(any(target_os = "linux", target_os = "android"))]
use ebioxp::{Bus, IoBoard, LinuxBus, RelayState};
#[cfg(any(target_os = "linux", target_os = "android"))]
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "ebioxp-tool",
    about = "Switch relays and read digital inputs on the EBIOXP 4I4O board",
    version,
    after_help = "Example: ebioxp-tool --relay 1 --on\tenergize relay #1"
)]
pub struct Cli {
    /// Relay number to energize or de-energize
    #[arg(
        short = 'r',
        long,
        value_parser = clap::value_parser!(u8).range(1..=4),
        group = "mode",
        requires = "level"
    )]
    pub relay: Option<u8>,

    /// Digital input number to read
    #[arg(
        short = 'd',
        long,
        visible_alias = "di",
        value_parser = clap::value_parser!(u8).range(1..=4),
        group = "mode"
    )]
    pub digital_input: Option<u8>,

    /// Energize the selected relay
    #[arg(long, group = "level", requires = "relay")]
    pub on: bool,

    /// De-energize the selected relay
    #[arg(long, group = "level", requires = "relay")]
    pub off: bool,

    /// Chip address on the bus
    #[arg(long, default_value = "0x3f", value_parser = parse_byte)]
    pub addr: u8,

    /// I2C device node
    #[arg(short, long, default_value = "/dev/i2c-1")]
    pub bus: String,
}

#[cfg(any(target_os = "linux", target_os = "android"))]
impl Cli {
    pub fn run(&self) -> Result<()> {
        if self.relay.is_none() && self.digital_input.is_none() {
            eprintln!("{}", Cli::command().render_help());
            return Ok(());
        }

        let mut bus = LinuxBus::open(&self.bus, self.addr)?;
        let outcome = self.execute(&mut bus);
        // Release the handle before reporting, on success and error alike.
        let closed = bus.close().map_err(Into::into);
        outcome.and(closed)
    }

    fn execute(&self, bus: &mut LinuxBus) -> Result<()> {
        let mut board = IoBoard::new(bus, self.addr);

        if !board.is_initialized()? {
            info!("initializing board at {:#04x}", self.addr);
            board.initialize()?;
        }

        if let Some(input) = self.digital_input {
            println!("{}", board.read_input(input)?);
        } else if let Some(relay) = self.relay {
            let state = if self.on { RelayState::On } else { RelayState::Off };
            board.set_relay(relay, state)?;
            info!(relay, ?state, "relay switched");
        }

        Ok(())
    }
}

fn parse_byte(s: &str) -> Result<u8, ParseIntError> {
    if let Some(hex) = s.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b") {
        u8::from_str_radix(bin, 2)
    } else {
        s.parse()
    }
}
