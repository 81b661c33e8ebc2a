/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use super::{AdcError, AdcInterface, Address, DataRate, Gain};
use crate::constants::*;
#[cfg(feature = "defmt")]
use defmt::println;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Async driver for the ADS1115 16-bit ADC, used in single-shot mode
pub struct Ads1115<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
    gain: Gain,
    data_rate: DataRate,
}

impl<I2C, D> Ads1115<I2C, D> {
    /// The bus must already be brought up by the caller; it may be shared
    /// with other devices through a bus-sharing wrapper.
    pub fn new(i2c: I2C, delay: D, address: Address) -> Self {
        Self {
            i2c,
            delay,
            addr: address.into_addr(),
            gain: Gain::default(),
            data_rate: DataRate::default(),
        }
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    pub fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    pub fn set_data_rate(&mut self, data_rate: DataRate) {
        self.data_rate = data_rate;
    }

    /// Give back the bus and delay source
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn single_shot_config(&self, channel: u8) -> u16 {
        let mux = ((CONFIG_MUX_SINGLE_0 + channel as u16) << CONFIG_MUX_SHIFT)
            & CONFIG_MUX_MASK;
        CONFIG_OS_SINGLE
            | mux
            | self.gain.config_bits()
            | CONFIG_MODE_SINGLE
            | self.data_rate.config_bits()
            | CONFIG_CMODE_TRAD
            | CONFIG_CPOL_ACTVLOW
            | CONFIG_CLAT_NONLAT
            | CONFIG_CQUE_NONE
    }
}

impl<I2C, D, E> Ads1115<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
{
    async fn write_register(&mut self, reg: u8, value: u16) -> Result<(), E> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c.write(self.addr, &[reg, hi, lo]).await
    }

    async fn read_register(&mut self, reg: u8) -> Result<u16, E> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.addr, &[reg], &mut buf).await?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Wait out the nominal conversion period, then poll the OS bit every
    /// quarter period, for up to 5/4 of a period more
    async fn wait_conversion_ready(&mut self) -> Result<(), AdcError<E>> {
        self.delay
            .delay_us(self.data_rate.conversion_time_us())
            .await;
        let poll_interval_us = self.data_rate.ready_poll_interval_us();

        let mut polls: u8 = 0;
        loop {
            let status = self
                .read_register(REG_CONFIG)
                .await
                .map_err(AdcError::Comm)?;
            if status & CONFIG_OS_READY != 0 {
                return Ok(());
            }
            if polls >= MAX_READY_POLLS {
                #[cfg(feature = "defmt")]
                println!("ads1115 conversion timeout");
                return Err(AdcError::ConversionTimeout);
            }
            polls += 1;
            self.delay.delay_us(poll_interval_us).await;
        }
    }
}

impl<I2C, D, E> AdcInterface for Ads1115<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
{
    type InterfaceError = E;

    async fn begin(&mut self) -> Result<(), AdcError<E>> {
        // any register read doubles as an acknowledge check
        match self.read_register(REG_CONFIG).await {
            Ok(_config) => {
                #[cfg(feature = "defmt")]
                println!("ads1115 @0x{:X} config 0x{:X}", self.addr, _config);
                Ok(())
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                println!("ads1115 @0x{:X} no ack", self.addr);
                Err(AdcError::NotDetected)
            }
        }
    }

    fn set_gain(&mut self, gain: Gain) {
        self.gain = gain;
    }

    fn gain(&self) -> Gain {
        self.gain
    }

    fn channel_count(&self) -> u8 {
        NUM_CHANNELS
    }

    async fn read_single_ended(&mut self, channel: u8) -> Result<i16, AdcError<E>> {
        if channel >= NUM_CHANNELS {
            return Err(AdcError::InvalidChannel(channel));
        }

        let config = self.single_shot_config(channel);
        self.write_register(REG_CONFIG, config)
            .await
            .map_err(AdcError::Comm)?;
        self.wait_conversion_ready().await?;

        let raw = self
            .read_register(REG_CONVERSION)
            .await
            .map_err(AdcError::Comm)?;
        Ok(raw as i16)
    }
}
