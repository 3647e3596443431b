//! Per-board interrupt and timer configuration.
//!
//! Which interrupt the period-match event arrives on, what priority it
//! gets and which pin the user LED sits on differ between boards. Each
//! supported board has a [`Variant`] whose [`Config`] is picked at start-up.

use fugit::MicrosDurationU32;

use crate::board::LedPin;

/// Blink period of every preset: one toggle per second.
pub const DEFAULT_PERIOD: MicrosDurationU32 = MicrosDurationU32::from_ticks(1_000_000);

/// Interrupt number as used by the NVIC (exceptions not counted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Irq(pub u16);

impl Irq {
    pub const fn number(self) -> u16 {
        self.0
    }
}

/// Name of the vector table entry the timer event is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector(pub &'static str);

impl Vector {
    pub const fn name(self) -> &'static str {
        self.0
    }
}

/// How the interrupt priority is handed to the NVIC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PriorityScheme {
    /// Written as-is.
    Direct(u8),
    /// Split into preemption and sub-priority according to the board's
    /// priority grouping.
    Grouped { preempt: u8, sub: u8 },
}

/// A priority that loses bits when it is written to the NVIC.
///
/// Not fatal: [`PriorityScheme::resolve`] masks the value the same way the
/// CMSIS helpers do, and start-up only logs this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PriorityError {
    #[error("priority {priority} does not fit in {bits} priority bits")]
    Direct { priority: u8, bits: u8 },
    #[error("preemption priority {preempt} does not fit in {bits} bits (grouping {grouping})")]
    Preempt { preempt: u8, bits: u8, grouping: u8 },
    #[error("sub-priority {sub} does not fit in {bits} bits (grouping {grouping})")]
    Sub { sub: u8, bits: u8, grouping: u8 },
}

impl PriorityScheme {
    /// Priority value to pass to [`crate::Board::set_priority`].
    ///
    /// Bits that do not fit are dropped, like `NVIC_EncodePriority` and
    /// `NVIC_SetPriority` do.
    pub fn resolve(self, grouping: u8, prio_bits: u8) -> u8 {
        match self {
            PriorityScheme::Direct(priority) => (u16::from(priority) & mask(prio_bits)) as u8,
            PriorityScheme::Grouped { preempt, sub } => {
                encode_priority(grouping, preempt, sub, prio_bits)
            }
        }
    }

    /// Report whether [`PriorityScheme::resolve`] would have to drop bits.
    pub fn check(self, grouping: u8, prio_bits: u8) -> Result<(), PriorityError> {
        match self {
            PriorityScheme::Direct(priority) => {
                if u16::from(priority) > mask(prio_bits) {
                    return Err(PriorityError::Direct {
                        priority,
                        bits: prio_bits,
                    });
                }
            }
            PriorityScheme::Grouped { preempt, sub } => {
                let grouping = grouping & 0x07;
                let (preempt_bits, sub_bits) = group_bits(grouping, prio_bits);
                if u16::from(preempt) > mask(preempt_bits) {
                    return Err(PriorityError::Preempt {
                        preempt,
                        bits: preempt_bits,
                        grouping,
                    });
                }
                if u16::from(sub) > mask(sub_bits) {
                    return Err(PriorityError::Sub {
                        sub,
                        bits: sub_bits,
                        grouping,
                    });
                }
            }
        }
        Ok(())
    }
}

fn mask(bits: u8) -> u16 {
    (1u16 << bits.min(8)) - 1
}

/// Number of preemption and sub-priority bits for a grouping.
fn group_bits(grouping: u8, prio_bits: u8) -> (u8, u8) {
    let grouping = grouping & 0x07;
    let preempt_bits = (7 - grouping).min(prio_bits);
    let sub_bits = (grouping + prio_bits).saturating_sub(7);
    (preempt_bits, sub_bits)
}

/// Combine a preemption and sub-priority into one NVIC priority.
///
/// Bits that do not fit the grouping are dropped, matching the CMSIS
/// `NVIC_EncodePriority` helper.
pub fn encode_priority(grouping: u8, preempt: u8, sub: u8, prio_bits: u8) -> u8 {
    let (preempt_bits, sub_bits) = group_bits(grouping, prio_bits);
    let value =
        ((u16::from(preempt) & mask(preempt_bits)) << sub_bits) | (u16::from(sub) & mask(sub_bits));
    value as u8
}

/// Split an NVIC priority back into `(preempt, sub)`.
pub fn decode_priority(priority: u8, grouping: u8, prio_bits: u8) -> (u8, u8) {
    let (preempt_bits, sub_bits) = group_bits(grouping, prio_bits);
    let value = u16::from(priority);
    let preempt = (value >> sub_bits) & mask(preempt_bits);
    let sub = value & mask(sub_bits);
    (preempt as u8, sub as u8)
}

/// Move a logical priority into the implemented (upper) bits of the 8-bit
/// priority register.
pub fn hw_priority(priority: u8, prio_bits: u8) -> u8 {
    let shift = 8 - prio_bits.min(8);
    ((u16::from(priority) << shift) & 0xff) as u8
}

/// Boards with a preset configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// XMC13 and XMC14 boot kits (Cortex-M0, 2 priority bits).
    Xmc1x,
    /// XMC4x relax and PLT2GO kits (Cortex-M4, 6 priority bits).
    Xmc4x,
    /// STM32F746G-DISCO, the board the firmware binary runs on.
    Stm32f746Disco,
}

impl Variant {
    pub const fn config(self) -> Config {
        match self {
            Variant::Xmc1x => Config {
                variant: self,
                vector: Vector("CCU80_SR0"),
                irq: Irq(25),
                priority: PriorityScheme::Direct(3),
                prio_bits: 2,
                period: DEFAULT_PERIOD,
                led: LedPin::new(4, 0),
                debug_print: cfg!(feature = "debug-print"),
            },
            Variant::Xmc4x => Config {
                variant: self,
                vector: Vector("CCU80_SR1"),
                irq: Irq(61),
                priority: PriorityScheme::Grouped {
                    preempt: 61,
                    sub: 0,
                },
                prio_bits: 6,
                period: DEFAULT_PERIOD,
                led: LedPin::new(5, 9),
                debug_print: cfg!(feature = "debug-print"),
            },
            Variant::Stm32f746Disco => Config {
                variant: self,
                vector: Vector("TIM2"),
                irq: Irq(28),
                priority: PriorityScheme::Direct(3),
                prio_bits: 4,
                period: DEFAULT_PERIOD,
                // PI1, green user LED
                led: LedPin::new(8, 1),
                debug_print: cfg!(feature = "debug-print"),
            },
        }
    }
}

/// Everything the start-up sequence needs to know about the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub variant: Variant,
    pub vector: Vector,
    pub irq: Irq,
    pub priority: PriorityScheme,
    /// Priority bits implemented by this part's NVIC.
    pub prio_bits: u8,
    /// Period of the match interrupt, i.e. the time between two toggles.
    pub period: MicrosDurationU32,
    pub led: LedPin,
    /// Print the fixed status lines on the debug console.
    pub debug_print: bool,
}

impl Config {
    pub const fn with_debug_print(mut self, enabled: bool) -> Self {
        self.debug_print = enabled;
        self
    }

    pub const fn with_priority(mut self, priority: PriorityScheme) -> Self {
        self.priority = priority;
        self
    }

    pub const fn with_period(mut self, period: MicrosDurationU32) -> Self {
        self.period = period;
        self
    }

    /// Logical priority for the board's current grouping, masked to this
    /// part's priority bits.
    pub fn priority_for(&self, grouping: u8) -> u8 {
        self.priority.resolve(grouping, self.prio_bits)
    }

    /// Whether [`Config::priority_for`] keeps the configured value intact.
    pub fn check_priority(&self, grouping: u8) -> Result<(), PriorityError> {
        self.priority.check(grouping, self.prio_bits)
    }
}

impl From<Variant> for Config {
    fn from(variant: Variant) -> Self {
        variant.config()
    }
}
