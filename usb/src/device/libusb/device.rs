use crate::device::base::{ControlTransport, GvUsb2Device, UsbData};
use crate::error::{ConnectError, TransportError};
use crate::{PID_GVUSB2, VID_GVUSB2};
use log::{debug, info};
use rusb::{
    Device, DeviceDescriptor, DeviceHandle, Direction, GlobalContext, Language, Recipient,
    RequestType,
};
use std::time::Duration;

pub struct GvUsb2USB {
    handle: DeviceHandle<GlobalContext>,
    device: Device<GlobalContext>,
    descriptor: DeviceDescriptor,
    language: Option<Language>,
}

impl GvUsb2USB {
    fn find_device(
        device: GvUsb2Device,
    ) -> Result<(Device<GlobalContext>, DeviceDescriptor), ConnectError> {
        for usb_device in rusb::devices()?.iter() {
            if usb_device.bus_number() == device.bus_number
                && usb_device.address() == device.address
            {
                let descriptor = usb_device.device_descriptor()?;
                return Ok((usb_device, descriptor));
            }
        }
        Err(ConnectError::DeviceNotFound)
    }

    pub fn from_device(device: GvUsb2Device) -> Result<Self, ConnectError> {
        // Firstly, we need to locate the USB device based on the location..
        let (device, descriptor) = GvUsb2USB::find_device(device)?;
        if !is_gvusb2(&descriptor) {
            return Err(ConnectError::DeviceNotGvUsb2);
        }

        let handle = device.open()?;
        info!("Connected to GV-USB2 device at {:?}", handle.device());

        // The string descriptors are only used for reporting, so a device without them is fine.
        let language = handle
            .read_languages(Duration::from_millis(100))
            .ok()
            .and_then(|languages| languages.first().cloned());

        Ok(Self {
            device: handle.device(),
            handle,
            descriptor,
            language,
        })
    }

    pub fn is_connected(&self) -> bool {
        debug!("Checking Disconnect for device: {:?}", self.device);
        self.handle.active_configuration().is_ok()
    }

    pub fn get_descriptor(&self) -> Result<UsbData, ConnectError> {
        let version = self.descriptor.device_version();
        let device_version = (version.0, version.1, version.2);

        let (device_manufacturer, product_name) = match self.language {
            Some(language) => (
                self.handle.read_manufacturer_string(
                    language,
                    &self.descriptor,
                    Duration::from_millis(100),
                )?,
                self.handle.read_product_string(
                    language,
                    &self.descriptor,
                    Duration::from_millis(100),
                )?,
            ),
            None => (String::new(), String::new()),
        };

        Ok(UsbData {
            vendor_id: self.descriptor.vendor_id(),
            product_id: self.descriptor.product_id(),
            device_version,
            device_manufacturer,
            product_name,
        })
    }
}

impl ControlTransport for GvUsb2USB {
    fn read_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        Ok(self.handle.read_control(
            rusb::request_type(Direction::In, RequestType::Vendor, Recipient::Device),
            request,
            value,
            index,
            buf,
            timeout,
        )?)
    }

    fn write_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, TransportError> {
        Ok(self.handle.write_control(
            rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Device),
            request,
            value,
            index,
            data,
            timeout,
        )?)
    }
}

fn is_gvusb2(descriptor: &DeviceDescriptor) -> bool {
    descriptor.vendor_id() == VID_GVUSB2 && descriptor.product_id() == PID_GVUSB2
}

pub fn find_devices() -> Vec<GvUsb2Device> {
    let mut found_devices: Vec<GvUsb2Device> = Vec::new();

    if let Ok(devices) = rusb::devices() {
        for device in devices.iter() {
            if let Ok(descriptor) = device.device_descriptor() {
                if is_gvusb2(&descriptor) {
                    found_devices.push(GvUsb2Device {
                        bus_number: device.bus_number(),
                        address: device.address(),
                    });
                }
            }
        }
    }

    found_devices
}
