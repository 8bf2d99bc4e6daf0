use crate::bringup;
use crate::device::base::ControlTransport;
use crate::error::RegisterError;
use crate::registers;
use crate::registers::{DEFAULT_TIMEOUT, MIN_TIMEOUT};
use std::time::Duration;

/// Per-device state, created when a GV-USB2 is attached and freed when it goes away.
///
/// The handle can be owned (`GvUsb2<GvUsb2USB>`) or lent (`GvUsb2<&mut GvUsb2USB>`). Either way
/// only one caller can touch the registers at a time, wrap this in a lock to share it between
/// threads.
pub struct GvUsb2<T: ControlTransport> {
    handle: T,
    timeout: Duration,
}

impl<T: ControlTransport> GvUsb2<T> {
    pub fn init(handle: T) -> Self {
        Self {
            handle,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-transfer timeout, never going below [`MIN_TIMEOUT`].
    ///
    /// libusb treats a zero timeout as "wait forever", and anything under a millisecond
    /// rounds down to zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(MIN_TIMEOUT);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Tears the state down, handing the device handle back to the caller.
    pub fn free(self) -> T {
        // There's nothing of our own to release (yet).
        self.handle
    }

    pub fn handle(&self) -> &T {
        &self.handle
    }

    pub fn read_register(&mut self, register: u16) -> Result<u8, RegisterError> {
        registers::read_register(&mut self.handle, register, self.timeout)
    }

    pub fn write_register(&mut self, register: u16, value: u8) -> Result<(), RegisterError> {
        registers::write_register(&mut self.handle, register, value, self.timeout)
    }

    pub fn update_register_masked(
        &mut self,
        register: u16,
        mask: u8,
        value: u8,
    ) -> Result<(), RegisterError> {
        registers::update_register_masked(&mut self.handle, register, mask, value, self.timeout)
    }

    /// Brings the audio ADC path up: GPIOs configured, AC97 off, I2S on.
    pub fn run_bring_up(&mut self) -> Result<(), RegisterError> {
        bringup::run_bring_up(&mut self.handle, self.timeout)
    }
}
