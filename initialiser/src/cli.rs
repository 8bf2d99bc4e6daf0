use clap::{Parser, Subcommand, ValueEnum};
use std::num::ParseIntError;

#[derive(Parser, Debug)]
#[clap(about, version, author)]
pub struct Cli {
    /// Minimum log level to print out
    #[clap(long, value_enum, default_value = "info")]
    pub log_level: LevelFilter,

    /// How long to wait for each control transfer, in milliseconds
    #[clap(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Only use the device on this USB bus
    #[clap(long)]
    pub bus: Option<u8>,

    /// Only use the device at this USB address
    #[clap(long)]
    pub address: Option<u8>,

    #[clap(subcommand)]
    pub command: Option<SubCommands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SubCommands {
    /// List attached GV-USB2 devices
    List,

    /// Configure the audio GPIOs and switch the ADC from AC97 to I2S (default)
    ResetAdc,

    /// Read a single register
    Read {
        #[clap(value_parser = parse_u16)]
        register: u16,
    },

    /// Write a single register
    Write {
        #[clap(value_parser = parse_u16)]
        register: u16,

        #[clap(value_parser = parse_u8)]
        value: u8,
    },

    /// Replace only the bits of a register selected by a mask
    Mask {
        #[clap(value_parser = parse_u16)]
        register: u16,

        #[clap(value_parser = parse_u8)]
        mask: u8,

        #[clap(value_parser = parse_u8)]
        value: u8,
    },
}

#[repr(usize)]
#[derive(ValueEnum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum LevelFilter {
    /// A level lower than all log levels.
    Off,
    /// Corresponds to the `Error` log level.
    Error,
    /// Corresponds to the `Warn` log level.
    Warn,
    /// Corresponds to the `Info` log level.
    Info,
    /// Corresponds to the `Debug` log level.
    Debug,
    /// Corresponds to the `Trace` log level.
    Trace,
}

impl From<LevelFilter> for log::LevelFilter {
    fn from(level: LevelFilter) -> Self {
        match level {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Error => log::LevelFilter::Error,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Trace => log::LevelFilter::Trace,
        }
    }
}

// Register maps are always written in hex, so accept 0x0500 as well as 1280.
fn parse_u16(input: &str) -> Result<u16, ParseIntError> {
    match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => input.parse(),
    }
}

fn parse_u8(input: &str) -> Result<u8, ParseIntError> {
    match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => input.parse(),
    }
}
