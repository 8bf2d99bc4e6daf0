pub mod base;

#[cfg(test)]
pub(crate) mod fake;

mod libusb;

pub use libusb::device::{find_devices, GvUsb2USB};
