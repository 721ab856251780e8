//! Timer peripheral capability
//!
//! One [`TimerPeripheral`] represents a single hardware timer with up to
//! four compare units. Every method takes `&self`: the operations map to
//! single register-word reads and writes, which the target hardware
//! performs atomically, and the same handle is shared between main-context
//! callers and interrupt handlers without a lock. Implementations must not
//! buffer or defer a register write past the method's return.

/// Identity of one hardware timer instance.
///
/// Used to deduplicate per-peripheral work (clock enable, counter
/// start/stop) across channels sharing a timer, and to resolve the
/// peripheral's interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerId(pub u8);

/// One of the four compare units of a timer peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubChannel {
    Sub1,
    Sub2,
    Sub3,
    Sub4,
}

impl SubChannel {
    /// All compare units, in hardware order.
    pub const ALL: [SubChannel; 4] = [
        SubChannel::Sub1,
        SubChannel::Sub2,
        SubChannel::Sub3,
        SubChannel::Sub4,
    ];

    /// Zero-based index, for register lookup tables.
    pub const fn index(self) -> usize {
        match self {
            SubChannel::Sub1 => 0,
            SubChannel::Sub2 => 1,
            SubChannel::Sub3 => 2,
            SubChannel::Sub4 => 3,
        }
    }
}

/// Output level of a PWM channel.
///
/// Doubles as the polarity/idle-level selector in channel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputState {
    High,
    Low,
}

/// Interrupt-capable timer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerEvent {
    /// Compare-match on one compare unit (rising edge of the waveform).
    CompareMatch(SubChannel),
    /// Counter reload/update. Peripheral-wide: there is one update event
    /// per timer, shared by all compare units.
    Update,
}

/// Capability handle for one hardware timer instance.
pub trait TimerPeripheral {
    /// Stable identity of this instance.
    fn id(&self) -> TimerId;

    /// Enable the peripheral's clock domain. Called once per distinct
    /// instance during driver init; must be idempotent.
    fn enable_clock(&self);

    /// Start the counter.
    fn start(&self);

    /// Stop the counter.
    fn stop(&self);

    /// Write the reload (period) register, in ticks.
    fn set_reload(&self, ticks: u16);

    /// Read the live reload register.
    fn reload(&self) -> u16;

    /// Write one compare unit's compare register, in ticks.
    fn set_compare(&self, sub: SubChannel, ticks: u16);

    /// Read one compare unit's compare register.
    fn compare(&self, sub: SubChannel) -> u16;

    /// Select the active output level of one compare unit.
    fn set_polarity(&self, sub: SubChannel, polarity: OutputState);

    /// Enable or disable one compare unit's output stage.
    fn set_output_enabled(&self, sub: SubChannel, enabled: bool);

    /// Read one compare unit's output-enable bit.
    fn output_enabled(&self, sub: SubChannel) -> bool;

    /// Enable or disable the interrupt source for an event.
    ///
    /// [`TimerEvent::Update`] controls the shared peripheral-wide source.
    fn set_event_irq(&self, event: TimerEvent, enabled: bool);
}
