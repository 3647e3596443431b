//! Optional debug output on the board's serial port.

use core::convert::Infallible;

use embedded_io::{ErrorType, Write};

pub const INIT_DONE: &str = "Initialization done\r\n";
pub const LED_TOGGLED: &str = "User LED toggled\r\n";

/// Prints the fixed status lines, each at most once.
///
/// Output is best effort: a console without a transport, or with printing
/// disabled, stays silent, and write errors are dropped.
pub struct DebugConsole<W> {
    out: Option<W>,
    enabled: bool,
    init_reported: bool,
    toggle_reported: bool,
}

impl<W: Write> DebugConsole<W> {
    pub fn new(out: Option<W>, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            init_reported: false,
            toggle_reported: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.out.is_some()
    }

    pub fn init_done(&mut self) {
        if !self.init_reported {
            self.init_reported = true;
            self.print(INIT_DONE);
        }
    }

    /// Report the first LED toggle; later toggles are not reported.
    pub fn led_toggled(&mut self) {
        if !self.toggle_reported {
            self.toggle_reported = true;
            self.print(LED_TOGGLED);
        }
    }

    fn print(&mut self, line: &str) {
        if !self.enabled {
            return;
        }
        if let Some(out) = self.out.as_mut() {
            let _ = out.write_all(line.as_bytes());
            let _ = out.flush();
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

/// Transport for boards without a debug serial port; discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoConsole;

impl ErrorType for NoConsole {
    type Error = Infallible;
}

impl Write for NoConsole {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::ErrorKind;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Capture(Vec<u8>);

    impl ErrorType for Capture {
        type Error = Infallible;
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct Broken;

    impl ErrorType for Broken {
        type Error = ErrorKind;
    }

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
            Err(ErrorKind::Other)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    fn output(console: DebugConsole<Capture>) -> String {
        let bytes = console.into_inner().map(|c| c.0).unwrap_or_default();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn prints_each_line_once() {
        let mut console = DebugConsole::new(Some(Capture::default()), true);
        console.init_done();
        console.init_done();
        console.led_toggled();
        console.led_toggled();
        console.led_toggled();

        assert_eq!(
            output(console),
            "Initialization done\r\nUser LED toggled\r\n"
        );
    }

    #[test]
    fn disabled_console_is_silent() {
        let mut console = DebugConsole::new(Some(Capture::default()), false);
        assert!(!console.is_enabled());
        console.init_done();
        console.led_toggled();

        assert_eq!(output(console), "");
    }

    #[test]
    fn missing_transport_is_silent() {
        let mut console = DebugConsole::<Capture>::new(None, true);
        assert!(!console.is_enabled());
        console.init_done();
        console.led_toggled();
        assert!(console.into_inner().is_none());
    }

    #[test]
    fn write_errors_are_dropped() {
        let mut console = DebugConsole::new(Some(Broken), true);
        console.init_done();
        console.led_toggled();
    }

    #[test]
    fn no_console_accepts_everything() {
        let mut console = DebugConsole::new(Some(NoConsole), true);
        assert!(console.is_enabled());
        console.init_done();
        console.led_toggled();
    }
}
