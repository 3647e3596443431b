//! Board support for the STM32F746G-DISCO.
//!
//! The green user LED is on PI1 (letter i, number one), the ST-LINK virtual
//! COM port on USART1 (PA9/PB7). TIM2 provides the period-match interrupt.

use core::cell::RefCell;

use ccu_blinky::config::hw_priority;
use ccu_blinky::{AckInterrupt, Board, Config, Irq, LedPin, Notifier, PeriodMatchHandler};
use cortex_m::interrupt::{InterruptNumber, Mutex};
use cortex_m::peripheral::{NVIC, SCB, SYST};
use stm32f7xx_hal::gpio::{Output, PI1};
use stm32f7xx_hal::pac::{self, interrupt, TIM2};
use stm32f7xx_hal::prelude::*;
use stm32f7xx_hal::rcc::{self, HSEClock};
use stm32f7xx_hal::timer::{CounterUs, Event};

use crate::uart_serial::{init_uart_serial, SerialTx};
use crate::{Mono, CLOCK_FREQ_HZ};

/// PI1 as a port/pin pair (port I is the ninth port).
pub const USER_LED: LedPin = LedPin::new(8, 1);

type Tim2Handler = PeriodMatchHandler<'static, PeriodTimer>;

// Handed to the TIM2 interrupt once, at the end of board init
static G_HANDLER: Mutex<RefCell<Option<Tim2Handler>>> = Mutex::new(RefCell::new(None));

#[derive(Debug, thiserror::Error, defmt::Format)]
pub enum DiscoError {
    #[error("device peripherals already taken")]
    PeripheralsTaken,
    #[error("board already initialized")]
    AlreadyInitialized,
    #[error("timer period out of range")]
    TimerPeriod,
}

/// TIM2 running as a microsecond counter with the update event enabled.
pub struct PeriodTimer(CounterUs<TIM2>);

impl AckInterrupt for PeriodTimer {
    fn ack(&mut self) {
        // Must clear the update flag, otherwise the ISR re-runs immediately
        self.0.clear_interrupt(Event::Update);
    }
}

#[derive(Clone, Copy)]
struct IrqNumber(u16);

// SAFETY: the numbers come from the board configuration and name
// interrupts that exist on this device.
unsafe impl InterruptNumber for IrqNumber {
    fn number(self) -> u16 {
        self.0
    }
}

pub struct Disco {
    notifier: Option<Notifier<'static>>,
    nvic: NVIC,
    scb: SCB,
    syst: Option<SYST>,
    config: Config,
    led: Option<PI1<Output>>,
    serial: Option<SerialTx>,
}

impl Disco {
    pub fn new(
        notifier: Notifier<'static>,
        nvic: NVIC,
        scb: SCB,
        syst: SYST,
        config: &Config,
    ) -> Self {
        // Priority shifts and the LED pin both come from the config
        debug_assert_eq!(config.prio_bits, pac::NVIC_PRIO_BITS);
        debug_assert_eq!(config.led, USER_LED);
        Self {
            notifier: Some(notifier),
            nvic,
            scb,
            syst: Some(syst),
            config: *config,
            led: None,
            serial: None,
        }
    }
}

impl Board for Disco {
    type Error = DiscoError;
    type Console = SerialTx;

    fn init(&mut self) -> Result<(), Self::Error> {
        defmt::info!("Starting board init");

        let notifier = self
            .notifier
            .take()
            .ok_or(DiscoError::AlreadyInitialized)?;
        let device = pac::Peripherals::take().ok_or(DiscoError::PeripheralsTaken)?;

        // The DISCO board has a 25 MHz oscillator connected to
        // the HSE input. Configure the MCU to use this external
        // oscillator, and then set a frequency between 12.5 MHz
        // and 216 MHz (the program will panic if out of range).
        let hse_cfg = HSEClock::new(25_000_000.Hz(), rcc::HSEClockMode::Bypass);
        let rcc = device.RCC.constrain();
        let clocks = rcc.cfgr.hse(hse_cfg).sysclk(CLOCK_FREQ_HZ.Hz()).freeze();

        // Log timestamps only make sense once the final sysclk runs
        if let Some(syst) = self.syst.take() {
            Mono::start(syst, CLOCK_FREQ_HZ);
        }

        let gpioa = device.GPIOA.split();
        let gpiob = device.GPIOB.split();
        let gpioi = device.GPIOI.split();

        // Set up the usart1 (stlink v2 serial)
        self.serial = Some(init_uart_serial(device.USART1, gpiob.pb7, gpioa.pa9, &clocks));

        let mut led = gpioi.pi1.into_push_pull_output();
        led.set_low();
        self.led = Some(led);

        // Period-match timer; the NVIC line stays masked until enable_irq
        let mut counter = device.TIM2.counter_us(&clocks);
        counter
            .start(self.config.period)
            .map_err(|_| DiscoError::TimerPeriod)?;
        counter.listen(Event::Update);

        let handler = PeriodMatchHandler::new(PeriodTimer(counter), notifier);
        cortex_m::interrupt::free(|cs| G_HANDLER.borrow(cs).replace(Some(handler)));

        defmt::info!("Ending board init");
        Ok(())
    }

    fn retarget_io(&mut self) -> Option<Self::Console> {
        self.serial.take()
    }

    fn priority_grouping(&self) -> u8 {
        // AIRCR.PRIGROUP, bits [10:8]
        ((self.scb.aircr.read() >> 8) & 0b111) as u8
    }

    fn set_priority(&mut self, irq: Irq, priority: u8) {
        let prio = hw_priority(priority, self.config.prio_bits);
        unsafe {
            self.nvic.set_priority(IrqNumber(irq.number()), prio);
        }
    }

    fn enable_irq(&mut self, irq: Irq) {
        unsafe {
            NVIC::unmask(IrqNumber(irq.number()));
        }
    }

    fn toggle(&mut self, led: LedPin) {
        if led != self.config.led {
            defmt::warn!("no LED on {}", led);
            return;
        }
        if let Some(pin) = self.led.as_mut() {
            pin.toggle();
        }
    }
}

#[interrupt]
fn TIM2() {
    static mut HANDLER: Option<Tim2Handler> = None;

    let handler = HANDLER.get_or_insert_with(|| {
        cortex_m::interrupt::free(|cs| {
            // Move the handler here, leaving a None in its place
            G_HANDLER.borrow(cs).replace(None).unwrap()
        })
    });

    handler.handle();
}
