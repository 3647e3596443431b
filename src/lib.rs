//! Blink a user LED from a periodic timer interrupt.
//!
//! The timer's period-match interrupt only sets a flag; the main loop
//! polls that flag, clears it and toggles the LED. Everything the board
//! has to provide (init, interrupt priority and enable, the LED toggle and
//! an optional debug serial port) sits behind the [`Board`] trait, so the
//! handoff itself can be exercised on the host.
//!
//! The firmware binary (`--features firmware`) wires this up for the
//! STM32F746G-DISCO.
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod blinker;
pub mod board;
pub mod config;
pub mod console;
pub mod flag;
pub mod irq;
pub mod startup;

pub use blinker::{Blinker, LoopState};
pub use board::{Board, LedPin};
pub use config::{Config, Irq, PriorityError, PriorityScheme, Variant, Vector};
pub use console::{DebugConsole, NoConsole};
pub use flag::{Listener, Notifier, TimerFlag};
pub use irq::{AckInterrupt, PeriodMatchHandler};
pub use startup::{start, start_or_halt, StartError};
