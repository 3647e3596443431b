//! Firmware for the STM32F746G-DISCO: toggle the green user LED (PI1)
//! once per second from the TIM2 update interrupt.
//!
//! Build and flash with
//!
//! ```text
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! Add `--features debug-print` to get the status lines on the ST-LINK
//! virtual COM port (USART1, 115200 baud).

#![no_main]
#![no_std]

mod disco;
mod panic_etc;
mod uart_serial;

use ccu_blinky::{start_or_halt, TimerFlag, Variant};
use cortex_m_rt::entry;
use rtic_monotonics::systick::prelude::*;

use crate::disco::Disco;

pub const CLOCK_FREQ_HZ: u32 = 216_000_000;
pub const SYSTICK_RATE_HZ: u32 = 1000;

systick_monotonic!(Mono, SYSTICK_RATE_HZ);

#[entry]
fn main() -> ! {
    let config = Variant::Stm32f746Disco.config();
    defmt::info!("Starting {}", config.variant);

    // The flag lives for the rest of the program; the interrupt gets the
    // notifier, the main loop keeps the listener.
    let flag = cortex_m::singleton!(: TimerFlag = TimerFlag::new()).unwrap();
    let (notifier, listener) = flag.split();

    let cp = cortex_m::Peripherals::take().unwrap();
    let board = Disco::new(notifier, cp.NVIC, cp.SCB, cp.SYST, &config);

    start_or_halt(board, &config, listener).run()
}
