use crate::device::base::ControlTransport;
use crate::error::TransportError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Once;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transfer {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: usize,
}

/// A register file sitting behind a fake endpoint 0.
///
/// Every transfer is recorded, whether it succeeds or not. Registers that were never
/// written read back as zero.
#[derive(Default)]
pub(crate) struct FakeDevice {
    pub registers: HashMap<u16, u8>,
    pub transfers: Vec<Transfer>,
    fail_at: Option<(usize, TransportError)>,
    short_reads: bool,
}

impl FakeDevice {
    pub fn with_register(mut self, register: u16, value: u8) -> Self {
        self.registers.insert(register, value);
        self
    }

    /// Fails the `n`th transfer (counting from 1) with the given error.
    pub fn fail_at(mut self, n: usize, error: TransportError) -> Self {
        self.fail_at = Some((n, error));
        self
    }

    pub fn short_reads(mut self) -> Self {
        self.short_reads = true;
        self
    }

    pub fn register(&self, register: u16) -> u8 {
        self.registers.get(&register).copied().unwrap_or(0)
    }

    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.transfers
            .iter()
            .filter(|transfer| transfer.request == 0x01)
            .map(|transfer| (transfer.index, transfer.value as u8))
            .collect()
    }

    fn record(&mut self, transfer: Transfer) -> Result<(), TransportError> {
        self.transfers.push(transfer);
        match self.fail_at {
            Some((n, error)) if n == self.transfers.len() => Err(error),
            _ => Ok(()),
        }
    }
}

impl ControlTransport for FakeDevice {
    fn read_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        _timeout: Duration,
    ) -> Result<usize, TransportError> {
        self.record(Transfer {
            request_type: 0xc0,
            request,
            value,
            index,
            length: buf.len(),
        })?;

        if self.short_reads || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.register(index);
        Ok(1)
    }

    fn write_control(
        &mut self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        _timeout: Duration,
    ) -> Result<usize, TransportError> {
        self.record(Transfer {
            request_type: 0x40,
            request,
            value,
            index,
            length: data.len(),
        })?;

        self.registers.insert(index, value as u8);
        Ok(data.len())
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Collects every log line emitted on this thread while `f` runs.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    CAPTURED.with(|captured| captured.borrow_mut().clear());
    let result = f();
    let lines = CAPTURED.with(|captured| captured.borrow_mut().drain(..).collect());
    (result, lines)
}
