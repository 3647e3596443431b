//! USART1 on the ST-LINK virtual COM port, used as the debug console.

use core::convert::Infallible;

use embedded_io::{ErrorType, Write};
use hal::gpio::{PA9, PB7};
use hal::pac::USART1;
use hal::prelude::*;
use hal::rcc::Clocks;
use hal::serial::{self, Serial, Tx};
use stm32f7xx_hal as hal;

pub struct SerialTx {
    tx: Tx<USART1>,
}

impl SerialTx {
    pub fn new(tx: serial::Tx<USART1>) -> Self {
        Self { tx }
    }
}

impl ErrorType for SerialTx {
    type Error = Infallible;
}

impl Write for SerialTx {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for ch in buf {
            // Loop calling write until it succeeds. The HAL
            // serial write call does not block if a character
            // is currently being transmitted; it returns without
            // sending anything. Keep retrying until ch is sent.
            while self.tx.write(*ch).is_err() {}
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Configure USART1 for output only. The receive pin is claimed so nothing
/// else drives it, but its half of the port is dropped.
pub fn init_uart_serial(usart1: USART1, rx: PB7, tx: PA9, clocks: &Clocks) -> SerialTx {
    let serial = Serial::new(
        usart1,
        (tx.into_alternate(), rx.into_alternate()),
        clocks,
        serial::Config::default(), // Default to 115_200 bauds
    );

    let (tx, _rx) = serial.split();

    SerialTx::new(tx)
}
