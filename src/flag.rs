//! The "timer elapsed" flag shared by the period-match interrupt and the
//! main loop.

use core::sync::atomic::{AtomicBool, Ordering};

/// Single-slot flag set by the interrupt and cleared by the main loop.
///
/// The flag itself is only storage. Access goes through the two handles
/// returned by [`TimerFlag::split`]: one [`Notifier`] for the interrupt
/// context and one [`Listener`] for the loop. Splitting needs `&mut self`,
/// so for as long as the handles live no second pair can be made.
///
/// Pass it a `&'static mut` (e.g. from `cortex_m::singleton!`) to get
/// handles that can be moved into an interrupt handler.
#[derive(Debug, Default)]
pub struct TimerFlag {
    elapsed: AtomicBool,
}

impl TimerFlag {
    pub const fn new() -> Self {
        Self {
            elapsed: AtomicBool::new(false),
        }
    }

    pub fn split(&mut self) -> (Notifier<'_>, Listener<'_>) {
        // Start from a known state even if the flag was used before.
        *self.elapsed.get_mut() = false;
        let elapsed = &self.elapsed;
        (Notifier { elapsed }, Listener { elapsed })
    }
}

/// Producer side, owned by the interrupt handler.
#[derive(Debug)]
pub struct Notifier<'a> {
    elapsed: &'a AtomicBool,
}

impl Notifier<'_> {
    /// Mark the timer period as elapsed.
    ///
    /// Setting an already set flag is a no-op: the hardware produces at
    /// most one pending event before the loop drains it.
    #[inline]
    pub fn notify(&self) {
        self.elapsed.store(true, Ordering::Release);
    }
}

/// Consumer side, owned by the main loop.
#[derive(Debug)]
pub struct Listener<'a> {
    elapsed: &'a AtomicBool,
}

impl Listener<'_> {
    /// Clear the flag and return whether it was set.
    ///
    /// Clearing and reading are one atomic step, so a notification that
    /// lands while the caller acts on this one stays pending.
    #[inline]
    pub fn take(&mut self) -> bool {
        self.elapsed.swap(false, Ordering::AcqRel)
    }

    /// Look at the flag without clearing it.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.elapsed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let mut flag = TimerFlag::new();
        let (_notifier, mut listener) = flag.split();
        assert!(!listener.is_pending());
        assert!(!listener.take());
    }

    #[test]
    fn take_clears_what_notify_set() {
        let mut flag = TimerFlag::new();
        let (notifier, mut listener) = flag.split();

        notifier.notify();
        assert!(listener.is_pending());
        assert!(listener.take());
        assert!(!listener.is_pending());
        assert!(!listener.take());
    }

    #[test]
    fn repeated_notify_is_one_event() {
        let mut flag = TimerFlag::new();
        let (notifier, mut listener) = flag.split();

        notifier.notify();
        notifier.notify();
        assert!(listener.take());
        assert!(!listener.take());
    }

    #[test]
    fn peeking_does_not_clear() {
        let mut flag = TimerFlag::new();
        let (notifier, mut listener) = flag.split();

        notifier.notify();
        assert!(listener.is_pending());
        assert!(listener.is_pending());
        assert!(listener.take());
    }

    #[test]
    fn split_resets_a_stale_flag() {
        let mut flag = TimerFlag::new();
        {
            let (notifier, _listener) = flag.split();
            notifier.notify();
        }
        let (_notifier, listener) = flag.split();
        assert!(!listener.is_pending());
    }
}
