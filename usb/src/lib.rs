pub mod bringup;
pub mod devices;
pub mod error;
pub mod gvusb2;
pub mod registers;

mod device;

pub use device::base::{ControlTransport, GvUsb2Device, UsbData};

pub const VID_GVUSB2: u16 = 0x04bb;
pub const PID_GVUSB2: u16 = 0x0532;
