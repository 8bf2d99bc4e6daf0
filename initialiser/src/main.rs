use anyhow::{bail, Context, Result};
use clap::Parser;
use gvusb2_usb::devices::{find_devices, from_device, GvUsb2USB};
use gvusb2_usb::gvusb2::GvUsb2;
use gvusb2_usb::GvUsb2Device;
use log::{info, warn};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use std::time::Duration;

use crate::cli::{Cli, SubCommands};

mod cli;

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    CombinedLogger::init(vec![TermLogger::new(
        args.log_level.into(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .context("Could not configure the logger")?;

    info!("Checking for available GV-USB2 devices..");
    let devices: Vec<GvUsb2Device> = find_devices()
        .into_iter()
        .filter(|device| args.bus.is_none_or(|bus| bus == device.bus_number()))
        .filter(|device| args.address.is_none_or(|address| address == device.address()))
        .collect();

    let command = args.command.unwrap_or(SubCommands::ResetAdc);
    if command == SubCommands::List {
        list_devices(&devices);
        return Ok(());
    }

    let device = match devices.as_slice() {
        [] => bail!("No GV-USB2 device was found"),
        [device] => *device,
        [device, ..] => {
            warn!(
                "Found {} GV-USB2 devices, using the one at bus {} address {}. Use --bus and --address to pick another.",
                devices.len(),
                device.bus_number(),
                device.address()
            );
            *device
        }
    };

    let handle = from_device(device).context("Unable to open the GV-USB2")?;
    let mut gvusb2 = GvUsb2::init(handle).with_timeout(Duration::from_millis(args.timeout_ms));

    let result = execute(&mut gvusb2, command);
    if result.is_err() && !gvusb2.handle().is_connected() {
        warn!("The GV-USB2 appears to have been disconnected");
    }
    gvusb2.free();
    result
}

fn execute(gvusb2: &mut GvUsb2<GvUsb2USB>, command: SubCommands) -> Result<()> {
    match command {
        SubCommands::List => {}
        SubCommands::ResetAdc => {
            gvusb2
                .run_bring_up()
                .context("Failed to reset the audio ADC")?;
            info!("Audio ADC reset, I2S interface enabled");
        }
        SubCommands::Read { register } => {
            let value = gvusb2.read_register(register)?;
            println!("0x{:04x}: 0x{:02x}", register, value);
        }
        SubCommands::Write { register, value } => {
            gvusb2.write_register(register, value)?;
            info!("Wrote 0x{:02x} to 0x{:04x}", value, register);
        }
        SubCommands::Mask {
            register,
            mask,
            value,
        } => {
            gvusb2.update_register_masked(register, mask, value)?;
            let current = gvusb2.read_register(register)?;
            info!("0x{:04x} is now 0x{:02x}", register, current);
        }
    }
    Ok(())
}

fn list_devices(devices: &[GvUsb2Device]) {
    if devices.is_empty() {
        println!("No GV-USB2 devices found");
        return;
    }

    for device in devices {
        match from_device(*device) {
            Ok(handle) => match handle.get_descriptor() {
                Ok(data) => println!(
                    "Bus {:03} Device {:03}: {:04x}:{:04x} {} {} (rev {})",
                    device.bus_number(),
                    device.address(),
                    data.vendor_id(),
                    data.product_id(),
                    data.device_manufacturer(),
                    data.product_name(),
                    format_version(data.device_version())
                ),
                Err(e) => println!(
                    "Bus {:03} Device {:03}: unable to read descriptor ({})",
                    device.bus_number(),
                    device.address(),
                    e
                ),
            },
            Err(e) => println!(
                "Bus {:03} Device {:03}: unable to open the device.. {}",
                device.bus_number(),
                device.address(),
                e
            ),
        }
    }
}

// bcdDevice splits into major, minor and sub-minor, lsusb prints it as 1.00
fn format_version((major, minor, sub_minor): (u8, u8, u8)) -> String {
    format!("{}.{}{}", major, minor, sub_minor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_print_like_lsusb() {
        assert_eq!(format_version((1, 0, 0)), "1.00");
        assert_eq!(format_version((2, 1, 3)), "2.13");
    }
}
