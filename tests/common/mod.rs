#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use ccu_blinky::{Board, Irq, LedPin};
use embedded_io::{ErrorType, Write};

/// Everything the code under test asked the board to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init,
    RetargetIo,
    SetPriority(Irq, u8),
    EnableIrq(Irq),
    Toggle(LedPin),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitFailed;

/// Serial port that keeps what was written, shared with the test.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl ErrorType for Capture {
    type Error = Infallible;
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Board that records calls instead of touching hardware.
///
/// Clones share the call log and the serial capture, so a test can keep one
/// while the other is moved into the blinker.
#[derive(Clone, Default)]
pub struct MockBoard {
    calls: Rc<RefCell<Vec<Call>>>,
    serial: Capture,
    fail_init: bool,
    no_serial: bool,
    grouping: u8,
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    pub fn without_serial(mut self) -> Self {
        self.no_serial = true;
        self
    }

    pub fn with_grouping(mut self, grouping: u8) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn toggles(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::Toggle(_)))
            .count()
    }

    pub fn serial_output(&self) -> String {
        self.serial.text()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Board for MockBoard {
    type Error = InitFailed;
    type Console = Capture;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.record(Call::Init);
        if self.fail_init {
            Err(InitFailed)
        } else {
            Ok(())
        }
    }

    fn retarget_io(&mut self) -> Option<Self::Console> {
        self.record(Call::RetargetIo);
        if self.no_serial {
            None
        } else {
            Some(self.serial.clone())
        }
    }

    fn priority_grouping(&self) -> u8 {
        self.grouping
    }

    fn set_priority(&mut self, irq: Irq, priority: u8) {
        self.record(Call::SetPriority(irq, priority));
    }

    fn enable_irq(&mut self, irq: Irq) {
        self.record(Call::EnableIrq(irq));
    }

    fn toggle(&mut self, led: LedPin) {
        self.record(Call::Toggle(led));
    }
}
