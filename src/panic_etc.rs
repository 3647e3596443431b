use defmt_brtt as _; // global logger

use panic_probe as _;
use stm32f7xx_hal as _; // memory layout

use crate::Mono;
use crate::SYSTICK_RATE_HZ;
use rtic_monotonics::systick::prelude::*;

// Start-up failures go through core `panic!`, which panic-probe already
// prints over defmt; defmt's own panics just trap.
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

// Milliseconds since the SysTick monotonic was started in board init;
// reads 0 before that.
defmt::timestamp!("{=u32:ms}", {
    let ticks = Mono::now().ticks();
    1000 * ticks / SYSTICK_RATE_HZ
});
