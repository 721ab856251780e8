//! Interrupt routing capability
//!
//! Maps a timer identity to an interrupt-controller line and installs a
//! priority. Not every timer has a routable line (some are served by
//! shared or absent vectors); `line_for` returns `None` for those.

use super::timer::TimerId;

/// One interrupt-controller input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqLine(pub u16);

/// Preemption priority for an interrupt line. Lower is more urgent on
/// most targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqPriority(pub u8);

/// Capability handle for the interrupt controller.
pub trait InterruptRouter {
    /// Resolve the interrupt line serving a timer, if it has one.
    fn line_for(&self, timer: TimerId) -> Option<IrqLine>;

    /// Enable a line and install its priority.
    fn install(&self, line: IrqLine, priority: IrqPriority);
}
