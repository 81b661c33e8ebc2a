/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use crate::constants::*;

mod ads1115;
pub use ads1115::Ads1115;

#[cfg(test)]
pub(crate) mod mock_i2c_port;

/// Errors raised by an ADC behind a [`AdcInterface`]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError<E> {
    /// Bus communication error
    Comm(E),
    /// The ADC did not acknowledge during startup
    NotDetected,
    /// The requested input does not exist on this ADC
    InvalidChannel(u8),
    /// The conversion never reported completion
    ConversionTimeout,
}

/// The seam between the current sensor and the converter it is wired to.
pub trait AdcInterface {
    type InterfaceError;

    /// Check that the ADC responds on the bus and is ready to sample
    async fn begin(&mut self) -> Result<(), AdcError<Self::InterfaceError>>;

    /// Select the programmable gain used by subsequent conversions
    fn set_gain(&mut self, gain: Gain);

    fn gain(&self) -> Gain;

    /// Number of single-ended inputs
    fn channel_count(&self) -> u8;

    /// Run one single-ended conversion on `channel` and return the raw code
    async fn read_single_ended(
        &mut self,
        channel: u8,
    ) -> Result<i16, AdcError<Self::InterfaceError>>;

    /// Convert a raw code to volts using the configured gain
    fn compute_volts(&self, raw: i16) -> f32 {
        raw as f32 * (self.gain().full_scale_volts() / FULL_SCALE_COUNTS)
    }
}

/// Programmable gain amplifier setting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// ±6.144 V
    TwoThirds,
    /// ±4.096 V
    One,
    /// ±2.048 V
    #[default]
    Two,
    /// ±1.024 V
    Four,
    /// ±0.512 V
    Eight,
    /// ±0.256 V
    Sixteen,
}

impl Gain {
    pub fn full_scale_volts(self) -> f32 {
        match self {
            Gain::TwoThirds => 6.144,
            Gain::One => 4.096,
            Gain::Two => 2.048,
            Gain::Four => 1.024,
            Gain::Eight => 0.512,
            Gain::Sixteen => 0.256,
        }
    }

    pub(crate) fn config_bits(self) -> u16 {
        let pga: u16 = match self {
            Gain::TwoThirds => 0b000,
            Gain::One => 0b001,
            Gain::Two => 0b010,
            Gain::Four => 0b011,
            Gain::Eight => 0b100,
            Gain::Sixteen => 0b101,
        };
        (pga << CONFIG_PGA_SHIFT) & CONFIG_PGA_MASK
    }
}

/// Conversion rate in samples per second
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    Sps8,
    Sps16,
    Sps32,
    Sps64,
    #[default]
    Sps128,
    Sps250,
    Sps475,
    Sps860,
}

impl DataRate {
    pub fn samples_per_second(self) -> u32 {
        match self {
            DataRate::Sps8 => 8,
            DataRate::Sps16 => 16,
            DataRate::Sps32 => 32,
            DataRate::Sps64 => 64,
            DataRate::Sps128 => 128,
            DataRate::Sps250 => 250,
            DataRate::Sps475 => 475,
            DataRate::Sps860 => 860,
        }
    }

    /// Nominal time for one conversion, rounded up
    pub fn conversion_time_us(self) -> u32 {
        let sps = self.samples_per_second();
        (1_000_000 + sps - 1) / sps
    }

    /// Spacing of OS-bit polls once the nominal period has elapsed
    pub fn ready_poll_interval_us(self) -> u32 {
        self.conversion_time_us() / 4
    }

    pub(crate) fn config_bits(self) -> u16 {
        let dr: u16 = match self {
            DataRate::Sps8 => 0b000,
            DataRate::Sps16 => 0b001,
            DataRate::Sps32 => 0b010,
            DataRate::Sps64 => 0b011,
            DataRate::Sps128 => 0b100,
            DataRate::Sps250 => 0b101,
            DataRate::Sps475 => 0b110,
            DataRate::Sps860 => 0b111,
        };
        (dr << CONFIG_DR_SHIFT) & CONFIG_DR_MASK
    }
}

/// I2C address, chosen by what the ADDR pin is tied to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    #[default]
    Gnd,
    Vdd,
    Sda,
    Scl,
}

impl Address {
    pub fn into_addr(self) -> u8 {
        match self {
            Address::Gnd => ADDR_GND,
            Address::Vdd => ADDR_VDD,
            Address::Sda => ADDR_SDA,
            Address::Scl => ADDR_SCL,
        }
    }
}
