#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("No GV-USB2 device was found")]
    DeviceNotFound,

    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),

    #[error("Device is not a GV-USB2")]
    DeviceNotGvUsb2,
}

/// A failed control transfer, carrying the negative status code reported by the USB stack.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("{} ({code})", self.name())]
pub struct TransportError {
    code: i32,
}

impl TransportError {
    pub const IO: TransportError = TransportError::new(-1);
    pub const INVALID_PARAM: TransportError = TransportError::new(-2);
    pub const ACCESS: TransportError = TransportError::new(-3);
    pub const NO_DEVICE: TransportError = TransportError::new(-4);
    pub const NOT_FOUND: TransportError = TransportError::new(-5);
    pub const BUSY: TransportError = TransportError::new(-6);
    pub const TIMEOUT: TransportError = TransportError::new(-7);
    pub const OVERFLOW: TransportError = TransportError::new(-8);
    pub const PIPE: TransportError = TransportError::new(-9);
    pub const INTERRUPTED: TransportError = TransportError::new(-10);
    pub const NO_MEM: TransportError = TransportError::new(-11);
    pub const NOT_SUPPORTED: TransportError = TransportError::new(-12);
    pub const OTHER: TransportError = TransportError::new(-99);

    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    // Matches the names libusb_error_name() gives back.
    pub fn name(&self) -> &'static str {
        match self.code {
            -1 => "LIBUSB_ERROR_IO",
            -2 => "LIBUSB_ERROR_INVALID_PARAM",
            -3 => "LIBUSB_ERROR_ACCESS",
            -4 => "LIBUSB_ERROR_NO_DEVICE",
            -5 => "LIBUSB_ERROR_NOT_FOUND",
            -6 => "LIBUSB_ERROR_BUSY",
            -7 => "LIBUSB_ERROR_TIMEOUT",
            -8 => "LIBUSB_ERROR_OVERFLOW",
            -9 => "LIBUSB_ERROR_PIPE",
            -10 => "LIBUSB_ERROR_INTERRUPTED",
            -11 => "LIBUSB_ERROR_NO_MEM",
            -12 => "LIBUSB_ERROR_NOT_SUPPORTED",
            _ => "LIBUSB_ERROR_OTHER",
        }
    }
}

impl From<rusb::Error> for TransportError {
    fn from(error: rusb::Error) -> Self {
        match error {
            rusb::Error::Io => Self::IO,
            rusb::Error::InvalidParam => Self::INVALID_PARAM,
            rusb::Error::Access => Self::ACCESS,
            rusb::Error::NoDevice => Self::NO_DEVICE,
            rusb::Error::NotFound => Self::NOT_FOUND,
            rusb::Error::Busy => Self::BUSY,
            rusb::Error::Timeout => Self::TIMEOUT,
            rusb::Error::Overflow => Self::OVERFLOW,
            rusb::Error::Pipe => Self::PIPE,
            rusb::Error::Interrupted => Self::INTERRUPTED,
            rusb::Error::NoMem => Self::NO_MEM,
            rusb::Error::NotSupported => Self::NOT_SUPPORTED,
            _ => Self::OTHER,
        }
    }
}

/// A register operation that failed, along with the register it was aimed at.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("read failed on reg 0x{register:04x}")]
    Read {
        register: u16,
        source: TransportError,
    },

    #[error("write failed on reg 0x{register:04x}")]
    Write {
        register: u16,
        source: TransportError,
    },
}

impl RegisterError {
    pub fn register(&self) -> u16 {
        match self {
            RegisterError::Read { register, .. } | RegisterError::Write { register, .. } => {
                *register
            }
        }
    }

    pub fn transport_error(&self) -> TransportError {
        match self {
            RegisterError::Read { source, .. } | RegisterError::Write { source, .. } => *source,
        }
    }

    pub fn code(&self) -> i32 {
        self.transport_error().code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rusb_errors_keep_their_libusb_codes() {
        assert_eq!(TransportError::from(rusb::Error::Timeout).code(), -7);
        assert_eq!(TransportError::from(rusb::Error::Pipe).code(), -9);
        assert_eq!(TransportError::from(rusb::Error::NoDevice).code(), -4);
        assert_eq!(TransportError::from(rusb::Error::Other).code(), -99);
    }

    #[test]
    fn register_error_reports_register_and_code() {
        let error = RegisterError::Write {
            register: 0x050c,
            source: TransportError::TIMEOUT,
        };
        assert_eq!(error.register(), 0x050c);
        assert_eq!(error.code(), -7);
        assert_eq!(error.to_string(), "write failed on reg 0x050c");
    }

    #[test]
    fn transport_error_is_reported_once_as_the_source() {
        use std::error::Error;

        let error = RegisterError::Read {
            register: 0x0002,
            source: TransportError::PIPE,
        };
        let source = error.source().map(|source| source.to_string());
        assert_eq!(source.as_deref(), Some("LIBUSB_ERROR_PIPE (-9)"));
        assert!(!error.to_string().contains("LIBUSB_ERROR_PIPE"));
    }

    #[test]
    fn unknown_codes_are_named_other() {
        assert_eq!(TransportError::new(-71).name(), "LIBUSB_ERROR_OTHER");
        assert_eq!(TransportError::new(-71).code(), -71);
    }
}
