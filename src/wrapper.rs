/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use crate::constants::*;
use crate::interface::{AdcError, AdcInterface, Gain};
#[cfg(feature = "defmt")]
use defmt::println;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WrapperError<E> {
    ///Communications error
    CommError(E),
    /// The ADC did not acknowledge during startup
    SensorUnresponsive,
    /// Channel is not an input of the ADC
    InvalidChannel(u8),
    /// A read was attempted before a successful `init`
    NotInitialized,
    /// The ADC never finished a conversion
    ConversionTimeout,
    /// Measured current (amps) exceeds the sensor's rated bound
    OverCurrent(f32),
}

impl<E> From<AdcError<E>> for WrapperError<E> {
    fn from(err: AdcError<E>) -> Self {
        match err {
            AdcError::Comm(e) => WrapperError::CommError(e),
            AdcError::NotDetected => WrapperError::SensorUnresponsive,
            AdcError::InvalidChannel(ch) => WrapperError::InvalidChannel(ch),
            AdcError::ConversionTimeout => WrapperError::ConversionTimeout,
        }
    }
}

/// Linear model mapping sensor output voltage to current
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorModel {
    /// volts per amp
    pub sensitivity: f32,
    /// volts reported at zero current
    pub zero_current_offset: f32,
    /// rated current magnitude, amps
    pub max_current: f32,
    /// multiplicative correction
    pub calibration_factor: f32,
}

impl Default for SensorModel {
    fn default() -> Self {
        Self::nominal()
    }
}

impl SensorModel {
    pub const fn nominal() -> Self {
        Self {
            sensitivity: SENSITIVITY,
            zero_current_offset: ZERO_CURRENT_VOLTAGE,
            max_current: MAX_CURRENT,
            calibration_factor: CALIBRATION_FACTOR,
        }
    }

    pub const fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub const fn with_zero_current_offset(mut self, offset: f32) -> Self {
        self.zero_current_offset = offset;
        self
    }

    pub const fn with_max_current(mut self, max_current: f32) -> Self {
        self.max_current = max_current;
        self
    }

    pub const fn with_calibration_factor(mut self, factor: f32) -> Self {
        self.calibration_factor = factor;
        self
    }

    /// current = (voltage - zero offset) / sensitivity * calibration factor
    pub fn current_from_voltage(&self, voltage: f32) -> f32 {
        let current = (voltage - self.zero_current_offset) / self.sensitivity;
        current * self.calibration_factor
    }

    /// NaN readings count as exceeding the bound
    pub fn exceeds_max_current(&self, amps: f32) -> bool {
        !(amps <= self.max_current && amps >= -self.max_current)
    }
}

/// WCS1700 Hall-effect current sensor wired to one input of an ADC
pub struct Wcs1700<AI> {
    adc: AI,
    /// ADC input the sensor output is wired to
    channel: u8,
    model: SensorModel,
    /// has the ADC acknowledged and been configured
    initialized: bool,
}

impl<AI> Wcs1700<AI> {
    pub fn new(adc: AI, channel: u8) -> Self {
        Self::new_with_model(adc, channel, SensorModel::nominal())
    }

    pub fn new_with_model(adc: AI, channel: u8, model: SensorModel) -> Self {
        Self {
            adc,
            channel,
            model,
            initialized: false,
        }
    }

    /// Sensor on the input used by the reference wiring
    pub fn new_default_channel(adc: AI) -> Self {
        Self::new(adc, DEFAULT_CHANNEL)
    }

    /// Returns previously consumed ADC instance.
    pub fn release(self) -> AI {
        self.adc
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn model(&self) -> SensorModel {
        self.model
    }

    pub fn calibration_factor(&self) -> f32 {
        self.model.calibration_factor
    }

    pub fn set_calibration_factor(&mut self, factor: f32) {
        self.model.calibration_factor = factor;
    }

    pub fn zero_current_offset(&self) -> f32 {
        self.model.zero_current_offset
    }

    pub fn set_zero_current_offset(&mut self, offset: f32) {
        self.model.zero_current_offset = offset;
    }

    pub fn sensitivity(&self) -> f32 {
        self.model.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.model.sensitivity = sensitivity;
    }

    pub fn max_current(&self) -> f32 {
        self.model.max_current
    }

    pub fn set_max_current(&mut self, max_current: f32) {
        self.model.max_current = max_current;
    }

    /// Apply the sensor model to a voltage measured elsewhere
    pub fn current_from_voltage(&self, voltage: f32) -> f32 {
        self.model.current_from_voltage(voltage)
    }
}

impl<AI, E> Wcs1700<AI>
where
    AI: AdcInterface<InterfaceError = E>,
{
    /// Check the channel, bring up the ADC and select the ±4.096 V range.
    /// The bus itself is expected to be up already.
    pub async fn init(&mut self) -> Result<(), WrapperError<E>> {
        #[cfg(feature = "defmt")]
        println!("wcs1700 init ch {}", self.channel);

        self.initialized = false;
        if self.channel >= self.adc.channel_count() {
            #[cfg(feature = "defmt")]
            println!("wcs1700 bad channel {}", self.channel);
            return Err(WrapperError::InvalidChannel(self.channel));
        }

        self.adc.begin().await?;
        self.adc.set_gain(Gain::One);
        self.initialized = true;
        Ok(())
    }

    /// Same as `init`, reduced to whether the sensor is usable
    pub async fn initialize(&mut self) -> bool {
        self.init().await.is_ok()
    }

    /// Raw conversion code from the sensor's channel
    pub async fn read_raw_sample(&mut self) -> Result<i16, WrapperError<E>> {
        if !self.initialized {
            return Err(WrapperError::NotInitialized);
        }
        let raw = self.adc.read_single_ended(self.channel).await?;
        Ok(raw)
    }

    /// Sensor output in volts
    pub async fn read_voltage(&mut self) -> Result<f32, WrapperError<E>> {
        let raw = self.read_raw_sample().await?;
        Ok(self.adc.compute_volts(raw))
    }

    /// Current in amps. Readings beyond `max_current` are passed through.
    pub async fn read_current_amps(&mut self) -> Result<f32, WrapperError<E>> {
        let voltage = self.read_voltage().await?;
        Ok(self.model.current_from_voltage(voltage))
    }

    /// Like `read_current_amps`, but readings beyond `max_current`
    /// are reported as `OverCurrent`
    pub async fn read_current_checked(
        &mut self,
    ) -> Result<f32, WrapperError<E>> {
        let amps = self.read_current_amps().await?;
        if self.model.exceeds_max_current(amps) {
            #[cfg(feature = "defmt")]
            println!("wcs1700 over current {}", amps);
            return Err(WrapperError::OverCurrent(amps));
        }
        Ok(amps)
    }

    /// Measure the output with no current flowing and adopt it as the
    /// zero-current offset. Returns the new offset in volts.
    pub async fn calibrate_zero(&mut self) -> Result<f32, WrapperError<E>> {
        let mut sum: f32 = 0.0;
        for _ in 0..ZERO_CALIBRATION_SAMPLES {
            sum += self.read_voltage().await?;
        }
        let offset = sum / ZERO_CALIBRATION_SAMPLES as f32;
        self.model.zero_current_offset = offset;

        #[cfg(feature = "defmt")]
        println!("wcs1700 zero offset {} V", offset);
        Ok(offset)
    }
}
