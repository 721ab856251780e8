//! Channel configuration model
//!
//! A driver configuration is an ordered slice of [`ChannelConfig`]; the
//! slice position is the public channel index. The table is built by the
//! caller (usually as a `static` or a stack array) and borrowed by the
//! engine for its whole initialized lifetime; it is never mutated.

use bitflags::bitflags;

use crate::platform::traits::{OutputState, SubChannel, TimerPeripheral};

/// Hard cap on the channel table, independent of how many channels a
/// given configuration actually declares. `enable_notification` bounds
/// its index against this cap rather than the configured count.
pub const PWM_MAX_CHANNELS: usize = 12;

/// Q15 duty value representing 100%.
///
/// Duty cycles are unsigned fixed-point fractions: `0x0000` is 0% and
/// [`DUTY_FULL_SCALE`] is 100%. Values above full scale are not clamped.
pub const DUTY_FULL_SCALE: u16 = 0x8000;

/// Period mutability class of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelClass {
    /// Period may be changed at runtime via `set_period_and_duty`.
    VariablePeriod,
    /// Period is fixed after init.
    FixedPeriod,
    /// Period is fixed after init, phase-shifted output.
    FixedPeriodShifted,
}

bitflags! {
    /// Edge sources a notification can fire on.
    ///
    /// `RISING` maps to the compare-match interrupt of the channel's own
    /// compare unit. `FALLING` maps to the timer's update interrupt,
    /// which is shared by every channel on the same peripheral.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EdgeMask: u8 {
        const RISING = 1 << 0;
        const FALLING = 1 << 1;
        const BOTH = Self::RISING.bits() | Self::FALLING.bits();
    }
}

/// Static description of one logical PWM channel.
#[derive(Clone, Copy)]
pub struct ChannelConfig<'a> {
    /// Owning timer peripheral.
    pub timer: &'a dyn TimerPeripheral,
    /// Compare unit of the peripheral this channel drives.
    pub sub: SubChannel,
    /// Period mutability class.
    pub class: ChannelClass,
    /// Initial reload value, in timer ticks.
    pub default_period: u16,
    /// Initial compare value matching `default_period` (in ticks, not Q15).
    pub default_compare: u16,
    /// Active output level.
    pub polarity: OutputState,
    /// Output level when the channel is idled.
    pub idle_state: OutputState,
    /// Whether notification starts active.
    pub notification: bool,
    /// Handler invoked on notification, from interrupt context.
    pub callback: Option<&'a (dyn Fn() + Sync)>,
}

/// Complete driver configuration.
#[derive(Clone, Copy)]
pub struct PwmConfig<'a> {
    /// Channel table; slice order assigns channel indices 0..N-1.
    pub channels: &'a [ChannelConfig<'a>],
}
