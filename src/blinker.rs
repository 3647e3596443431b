//! The main loop: wait for the timer flag, clear it, toggle the LED.

use crate::board::{Board, LedPin};
use crate::console::DebugConsole;
use crate::flag::Listener;

/// What the loop will do on its next iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Flag clear, nothing to do.
    Idle,
    /// Flag set, a toggle is pending.
    Toggle,
}

/// Cooperative poller for the timer flag.
///
/// Built by [`crate::start`] once the board is up and the interrupt is
/// enabled.
pub struct Blinker<'a, B: Board> {
    board: B,
    listener: Listener<'a>,
    led: LedPin,
    console: DebugConsole<B::Console>,
}

impl<'a, B: Board> Blinker<'a, B> {
    pub(crate) fn new(
        board: B,
        listener: Listener<'a>,
        led: LedPin,
        console: DebugConsole<B::Console>,
    ) -> Self {
        Self {
            board,
            listener,
            led,
            console,
        }
    }

    pub fn state(&self) -> LoopState {
        if self.listener.is_pending() {
            LoopState::Toggle
        } else {
            LoopState::Idle
        }
    }

    /// One pass of the main loop. Returns whether the LED was toggled.
    ///
    /// The flag is cleared before the LED is touched, so a period match
    /// that fires during the toggle is picked up by the next tick.
    pub fn tick(&mut self) -> bool {
        if !self.listener.take() {
            return false;
        }

        self.board.toggle(self.led);
        #[cfg(feature = "defmt")]
        defmt::debug!("toggled LED {}", self.led);
        self.console.led_toggled();
        true
    }

    /// Spin on [`Blinker::tick`] until the device is reset or loses power.
    pub fn run(mut self) -> ! {
        loop {
            self.tick();
        }
    }

    pub fn led(&self) -> LedPin {
        self.led
    }
}
