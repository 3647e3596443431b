//! One-time bring-up before the main loop starts.

use crate::blinker::Blinker;
use crate::board::Board;
use crate::config::Config;
use crate::console::DebugConsole;
use crate::flag::Listener;

/// Start-up failures. All of them are fatal.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError<E> {
    #[error("board initialization failed: {0:?}")]
    BoardInit(E),
}

/// Bring up the board and enable the period-match interrupt.
///
/// In order: initialise the board, attach the debug console, report
/// "Initialization done", set the interrupt priority and enable the
/// interrupt. If init fails nothing else runs; the interrupt stays disabled
/// and the LED is never touched.
///
/// The priority is encoded with the grouping the board reports after init.
/// Bits that do not fit are dropped, not rejected.
pub fn start<'a, B: Board>(
    mut board: B,
    config: &Config,
    listener: Listener<'a>,
) -> Result<Blinker<'a, B>, StartError<B::Error>> {
    board.init().map_err(StartError::BoardInit)?;

    let mut console = DebugConsole::new(board.retarget_io(), config.debug_print);
    console.init_done();

    let grouping = board.priority_grouping();
    #[cfg(feature = "defmt")]
    if let Err(e) = config.check_priority(grouping) {
        defmt::warn!("{}, writing the masked value", e);
    }
    let priority = config.priority_for(grouping);
    board.set_priority(config.irq, priority);
    board.enable_irq(config.irq);

    #[cfg(feature = "defmt")]
    defmt::info!(
        "{} ready: {} (irq {}) priority {}, period {} ms",
        config.variant,
        config.vector.name(),
        config.irq.number(),
        priority,
        config.period.to_millis()
    );

    Ok(Blinker::new(board, listener, config.led, console))
}

/// [`start`], halting on failure.
///
/// Running on with a half-initialised board is undefined, so there is no
/// retry: the panic handler takes over before the loop is ever entered.
pub fn start_or_halt<'a, B>(board: B, config: &Config, listener: Listener<'a>) -> Blinker<'a, B>
where
    B: Board,
    B::Error: core::fmt::Debug,
{
    match start(board, config, listener) {
        Ok(blinker) => blinker,
        Err(e) => panic!("start-up failed: {}", e),
    }
}
