// ADS1115 register map, datasheet section 8.6
pub const REG_CONVERSION: u8 = 0x00;
pub const REG_CONFIG: u8 = 0x01;

// I2C addresses selected by the ADDR pin strapping
pub const ADDR_GND: u8 = 0x48;
pub const ADDR_VDD: u8 = 0x49;
pub const ADDR_SDA: u8 = 0x4A;
pub const ADDR_SCL: u8 = 0x4B;

// Config register fields, table 8-3
pub const CONFIG_OS_SINGLE: u16 = 0x8000; // write: start a single conversion
pub const CONFIG_OS_READY: u16 = 0x8000; // read: no conversion in progress

pub const CONFIG_MUX_SHIFT: u16 = 12;
pub const CONFIG_MUX_SINGLE_0: u16 = 0b100; // AIN0 vs GND
pub const CONFIG_MUX_MASK: u16 = 0x7000;

pub const CONFIG_PGA_SHIFT: u16 = 9;
pub const CONFIG_PGA_MASK: u16 = 0x0E00;

pub const CONFIG_MODE_SINGLE: u16 = 0x0100;

pub const CONFIG_DR_SHIFT: u16 = 5;
pub const CONFIG_DR_MASK: u16 = 0x00E0;

pub const CONFIG_CMODE_TRAD: u16 = 0x0000;
pub const CONFIG_CPOL_ACTVLOW: u16 = 0x0000;
pub const CONFIG_CLAT_NONLAT: u16 = 0x0000;
pub const CONFIG_CQUE_NONE: u16 = 0x0003;

/// Power-on value of the config register
pub const CONFIG_RESET: u16 = 0x8583;

/// Number of single-ended inputs (AIN0..AIN3)
pub const NUM_CHANNELS: u8 = 4;

/// Largest magnitude of a 16-bit conversion code
pub const FULL_SCALE_COUNTS: f32 = 32768.0;

/// How many times the OS bit is polled after the nominal conversion period,
/// one quarter period apart
pub const MAX_READY_POLLS: u8 = 5;

// WCS1700 nominal sensor model
pub const SENSITIVITY: f32 = 0.066; // volts per amp
pub const ZERO_CURRENT_VOLTAGE: f32 = 0.0; // volts at 0 A
pub const MAX_CURRENT: f32 = 75.0; // amps
pub const CALIBRATION_FACTOR: f32 = 1.0;

/// ADC input the sensor output is wired to by default
pub const DEFAULT_CHANNEL: u8 = 1;

/// Samples averaged by zero-offset calibration
pub const ZERO_CALIBRATION_SAMPLES: u8 = 16;
