use crate::error::TransportError;
use std::time::Duration;

/// Anything that can push a vendor control request at endpoint 0 of a GV-USB2.
///
/// This is the only thing the register layer needs from a device, so a real libusb handle
/// and a test fake are interchangeable. Both calls block until the transfer completes or
/// the timeout expires, and return the number of bytes transferred.
pub trait ControlTransport {
    fn read_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError>;

    fn write_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError>;
}

// Lets a caller lend its handle to the core instead of handing it over.
impl<T: ControlTransport + ?Sized> ControlTransport for &mut T {
    fn read_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).read_control(request, value, index, buf, timeout)
    }

    fn write_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).write_control(request, value, index, data, timeout)
    }
}

impl<T: ControlTransport + ?Sized> ControlTransport for Box<T> {
    fn read_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).read_control(request, value, index, buf, timeout)
    }

    fn write_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        (**self).write_control(request, value, index, data, timeout)
    }
}

// We primarily need the bus number, and address for comparison..
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GvUsb2Device {
    pub(crate) bus_number: u8,
    pub(crate) address: u8,
}

impl GvUsb2Device {
    pub fn bus_number(&self) -> u8 {
        self.bus_number
    }
    pub fn address(&self) -> u8 {
        self.address
    }
}

pub struct UsbData {
    pub(crate) vendor_id: u16,
    pub(crate) product_id: u16,
    pub(crate) device_version: (u8, u8, u8),
    pub(crate) device_manufacturer: String,
    pub(crate) product_name: String,
}

impl UsbData {
    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }
    pub fn product_id(&self) -> u16 {
        self.product_id
    }
    pub fn device_version(&self) -> (u8, u8, u8) {
        self.device_version
    }
    pub fn device_manufacturer(&self) -> String {
        self.device_manufacturer.clone()
    }
    pub fn product_name(&self) -> String {
        self.product_name.clone()
    }
}
