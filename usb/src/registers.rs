//! Single register reads and writes against the GV-USB2 vendor control interface.
//!
//! Every register is 8 bits wide and addressed by a 16 bit index. A read is a vendor IN
//! request carrying the address in `wIndex`, a write is a vendor OUT request carrying the
//! address in `wIndex` and the new value in `wValue` with no payload.
//!
//! None of these functions lock anything. Callers are expected to serialise all register
//! access to a device, which `&mut` already does within a single owner.
use crate::device::base::ControlTransport;
use crate::error::{RegisterError, TransportError};
use log::{debug, error};
use std::time::Duration;

pub const REQUEST_READ: u8 = 0x00;
pub const REQUEST_WRITE: u8 = 0x01;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);
pub const MIN_TIMEOUT: Duration = Duration::from_millis(1);

pub fn read_register<T: ControlTransport + ?Sized>(
    handle: &mut T,
    register: u16,
    timeout: Duration,
) -> Result<u8, RegisterError> {
    let mut buf = [0; 1];
    let result = match handle.read_control(REQUEST_READ, 0x00, register, &mut buf, timeout) {
        Ok(0) => Err(TransportError::IO),
        Ok(_) => Ok(buf[0]),
        Err(e) => Err(e),
    };

    match result {
        Ok(value) => {
            debug!("Read 0x{:02x} from reg 0x{:04x}", value, register);
            Ok(value)
        }
        Err(source) => {
            error!("read failed on reg 0x{:04x} ({})", register, source.code());
            Err(RegisterError::Read { register, source })
        }
    }
}

pub fn write_register<T: ControlTransport + ?Sized>(
    handle: &mut T,
    register: u16,
    value: u8,
    timeout: Duration,
) -> Result<(), RegisterError> {
    debug!("Writing 0x{:02x} to reg 0x{:04x}", value, register);
    if let Err(source) = handle.write_control(REQUEST_WRITE, value as u16, register, &[], timeout)
    {
        error!("write failed on reg 0x{:04x} ({})", register, source.code());
        return Err(RegisterError::Write { register, source });
    }
    Ok(())
}

/// Replaces the bits of `register` selected by `mask` with the matching bits of `value`.
///
/// This is a read followed by a write, nothing stops another party changing the register in
/// between. If the read fails, no write is attempted.
pub fn update_register_masked<T: ControlTransport + ?Sized>(
    handle: &mut T,
    register: u16,
    mask: u8,
    value: u8,
    timeout: Duration,
) -> Result<(), RegisterError> {
    let current = read_register(handle, register, timeout)?;
    write_register(handle, register, apply_mask(current, mask, value), timeout)
}

pub fn apply_mask(current: u8, mask: u8, value: u8) -> u8 {
    (current & !mask) | (value & mask)
}
