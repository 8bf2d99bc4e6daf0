// This file wraps the libusb side into some 'Plain Old Rust Structs' which can be used by other
// modules to find and open devices, without them needing to poll USB directly.
use crate::device::base::GvUsb2Device;
use crate::error::ConnectError;

pub use crate::device::GvUsb2USB;

pub fn find_devices() -> Vec<GvUsb2Device> {
    crate::device::find_devices()
}

pub fn from_device(device: GvUsb2Device) -> Result<GvUsb2USB, ConnectError> {
    GvUsb2USB::from_device(device)
}
