/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

#![no_std]
#![allow(async_fn_in_trait)]
extern crate embedded_hal_async;

#[allow(dead_code)]
pub mod constants;
pub mod interface;
pub mod wrapper;

pub use interface::{Address, AdcError, AdcInterface, Ads1115, DataRate, Gain};
pub use wrapper::{SensorModel, Wcs1700, WrapperError};
