//! Period-match interrupt handler.

use crate::flag::Notifier;

/// Acknowledge a pending period-match event on the timer peripheral.
///
/// Most timers keep their interrupt line asserted until software clears
/// the event, so this must run before the handler returns.
pub trait AckInterrupt {
    fn ack(&mut self);
}

/// For event sources that clear themselves.
impl AckInterrupt for () {
    fn ack(&mut self) {}
}

impl<T: AckInterrupt + ?Sized> AckInterrupt for &mut T {
    fn ack(&mut self) {
        (**self).ack()
    }
}

/// State the timer interrupt needs: the peripheral to acknowledge and the
/// producer side of the timer flag.
pub struct PeriodMatchHandler<'a, P> {
    source: P,
    notifier: Notifier<'a>,
}

impl<'a, P: AckInterrupt> PeriodMatchHandler<'a, P> {
    pub fn new(source: P, notifier: Notifier<'a>) -> Self {
        Self { source, notifier }
    }

    /// Body of the interrupt service routine.
    ///
    /// Never blocks and cannot fail.
    #[inline]
    pub fn handle(&mut self) {
        self.source.ack();
        self.notifier.notify();
    }

    pub fn release(self) -> (P, Notifier<'a>) {
        (self.source, self.notifier)
    }
}
