//! What the blinker needs from the board support package.

use crate::config::Irq;

/// A GPIO pin as a port/pin pair.
///
/// Ports are numbered from zero, so on parts with lettered ports `A` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedPin {
    pub port: u8,
    pub pin: u8,
}

impl LedPin {
    pub const fn new(port: u8, pin: u8) -> Self {
        Self { port, pin }
    }
}

/// Board collaborator.
///
/// All calls except [`Board::init`] are plain register writes on real
/// hardware and cannot fail.
pub trait Board {
    /// Why board bring-up failed.
    type Error;

    /// Serial transport for the debug console.
    type Console: embedded_io::Write;

    /// Bring up clocks and peripherals, including the period-match timer.
    ///
    /// Called exactly once before anything else touches the hardware. An
    /// error is fatal; nothing else on the board may be used afterwards.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Hand out the debug serial port, if the board has one.
    fn retarget_io(&mut self) -> Option<Self::Console>;

    /// Current NVIC priority grouping (the PRIGROUP field).
    fn priority_grouping(&self) -> u8;

    /// Set the priority of `irq`, in the NVIC's logical numbering (not yet
    /// shifted into the register's upper bits).
    fn set_priority(&mut self, irq: Irq, priority: u8);

    fn enable_irq(&mut self, irq: Irq);

    fn toggle(&mut self, led: LedPin);
}

impl<B: Board + ?Sized> Board for &mut B {
    type Error = B::Error;
    type Console = B::Console;

    fn init(&mut self) -> Result<(), Self::Error> {
        (**self).init()
    }

    fn retarget_io(&mut self) -> Option<Self::Console> {
        (**self).retarget_io()
    }

    fn priority_grouping(&self) -> u8 {
        (**self).priority_grouping()
    }

    fn set_priority(&mut self, irq: Irq, priority: u8) {
        (**self).set_priority(irq, priority)
    }

    fn enable_irq(&mut self, irq: Irq) {
        (**self).enable_irq(irq)
    }

    fn toggle(&mut self, led: LedPin) {
        (**self).toggle(led)
    }
}
