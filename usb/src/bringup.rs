//! The fixed register sequence that puts the audio ADC into a known state.
use crate::device::base::ControlTransport;
use crate::error::RegisterError;
use crate::registers::{update_register_masked, write_register};
use log::debug;
use std::time::Duration;

pub const REG_GPIO_OUTPUT: u16 = 0x0000;
pub const REG_GPIO_DIRECTION: u16 = 0x0002;
pub const REG_AC97_ENABLE: u16 = 0x0500;
pub const REG_I2S_ENABLE: u16 = 0x050c;

// GPIO pins 4 and 5 are wired to the audio ADC.
pub const AUDIO_GPIO_MASK: u8 = 0x30;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BringUpStep {
    SetMask { register: u16, mask: u8, value: u8 },
    Write { register: u16, value: u8 },
}

impl BringUpStep {
    pub fn register(&self) -> u16 {
        match self {
            BringUpStep::SetMask { register, .. } | BringUpStep::Write { register, .. } => {
                *register
            }
        }
    }

    pub fn apply<T: ControlTransport + ?Sized>(
        &self,
        handle: &mut T,
        timeout: Duration,
    ) -> Result<(), RegisterError> {
        match *self {
            BringUpStep::SetMask {
                register,
                mask,
                value,
            } => update_register_masked(handle, register, mask, value, timeout),
            BringUpStep::Write { register, value } => {
                write_register(handle, register, value, timeout)
            }
        }
    }
}

pub const ADC_RESET_SEQUENCE: [BringUpStep; 4] = [
    // Audio GPIO pins to output
    BringUpStep::SetMask {
        register: REG_GPIO_DIRECTION,
        mask: AUDIO_GPIO_MASK,
        value: 0x30,
    },
    BringUpStep::SetMask {
        register: REG_GPIO_OUTPUT,
        mask: AUDIO_GPIO_MASK,
        value: 0x10,
    },
    // Disable AC97
    BringUpStep::Write {
        register: REG_AC97_ENABLE,
        value: 0x00,
    },
    // Enable I2S
    BringUpStep::Write {
        register: REG_I2S_ENABLE,
        value: 0x01,
    },
];

/// Runs [`ADC_RESET_SEQUENCE`] in order, stopping at the first failure.
///
/// Steps that already ran are left as they are. Every step is unconditional, so running the
/// sequence again from any state ends up in the same place.
pub fn run_bring_up<T: ControlTransport + ?Sized>(
    handle: &mut T,
    timeout: Duration,
) -> Result<(), RegisterError> {
    for (index, step) in ADC_RESET_SEQUENCE.iter().enumerate() {
        debug!(
            "ADC reset step {} of {}: {:?}",
            index + 1,
            ADC_RESET_SEQUENCE.len(),
            step
        );
        step.apply(handle, timeout)?;
    }
    Ok(())
}
