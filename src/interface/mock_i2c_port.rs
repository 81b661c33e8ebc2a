extern crate std;

use crate::constants::*;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{
    ErrorKind, ErrorType, NoAcknowledgeSource, Operation, SevenBitAddress,
};
use std::collections::VecDeque;

/// Delay source that only records how long it was asked to wait
pub struct FakeDelay {
    pub elapsed_ns: u64,
}

impl FakeDelay {
    pub fn new() -> Self {
        Self { elapsed_ns: 0 }
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}

const MAX_FAKE_PACKET_SIZE: usize = 8;

/// One write as seen on the bus
pub struct FakePacket {
    pub addr: u8,
    pub len: usize,
    pub buf: [u8; MAX_FAKE_PACKET_SIZE],
}

impl FakePacket {
    pub fn new_from_slice(addr: u8, slice: &[u8]) -> Self {
        let src_len = slice.len();
        let mut inst = Self {
            addr,
            len: src_len,
            buf: [0; MAX_FAKE_PACKET_SIZE],
        };
        inst.buf[..src_len].copy_from_slice(slice);
        inst
    }
}

/// Simulates the register file of one ADS1115 at the default address
pub struct FakeI2cPort {
    pub sent_packets: VecDeque<FakePacket>,
    /// Number of OS-bit polls that report busy after each conversion start
    pub busy_polls: u8,
    present: bool,
    pointer: u8,
    config: u16,
    conversion: i16,
    pending_polls: u8,
}

impl FakeI2cPort {
    pub fn new() -> Self {
        FakeI2cPort {
            sent_packets: VecDeque::with_capacity(3),
            busy_polls: 0,
            present: true,
            pointer: REG_CONVERSION,
            config: CONFIG_RESET,
            conversion: 0,
            pending_polls: 0,
        }
    }

    /// A bus with nothing attached: every transfer is NACKed
    pub fn new_absent() -> Self {
        let mut port = Self::new();
        port.present = false;
        port
    }

    /// Value the conversion register will hold
    pub fn set_conversion(&mut self, raw: i16) {
        self.conversion = raw;
    }

    fn check_ack(&self, addr: SevenBitAddress) -> Result<(), FakeI2cError> {
        if self.present && addr == ADDR_GND {
            Ok(())
        } else {
            Err(FakeI2cError)
        }
    }

    fn register_value(&mut self) -> u16 {
        match self.pointer {
            REG_CONFIG => {
                if self.pending_polls > 0 {
                    self.pending_polls -= 1;
                    self.config & !CONFIG_OS_READY
                } else {
                    self.config | CONFIG_OS_READY
                }
            }
            REG_CONVERSION => self.conversion as u16,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeI2cError;

impl embedded_hal_async::i2c::Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

impl ErrorType for FakeI2cPort {
    type Error = FakeI2cError;
}

impl embedded_hal_async::i2c::I2c for FakeI2cPort {
    async fn read(
        &mut self,
        addr: SevenBitAddress,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.check_ack(addr)?;
        let bytes = self.register_value().to_be_bytes();
        for (dst, src) in buffer.iter_mut().zip(bytes.iter()) {
            *dst = *src;
        }
        Ok(())
    }

    async fn write(
        &mut self,
        addr: SevenBitAddress,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        self.check_ack(addr)?;
        self.sent_packets
            .push_back(FakePacket::new_from_slice(addr, bytes));

        if let Some(&reg) = bytes.first() {
            self.pointer = reg;
        }
        if bytes.len() == 3 && self.pointer == REG_CONFIG {
            let value = u16::from_be_bytes([bytes[1], bytes[2]]);
            self.config = value & !CONFIG_OS_SINGLE;
            if value & CONFIG_OS_SINGLE != 0 {
                self.pending_polls = self.busy_polls;
            }
        }
        Ok(())
    }

    async fn write_read(
        &mut self,
        address: SevenBitAddress,
        send_buf: &[u8],
        recv_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write(address, send_buf).await?;
        self.read(address, recv_buf).await?;
        Ok(())
    }

    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter_mut() {
            match op {
                Operation::Read(buf) => self.read(address, buf).await?,
                Operation::Write(bytes) => self.write(address, bytes).await?,
            }
        }
        Ok(())
    }
}
