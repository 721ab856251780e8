//! PWM engine
//!
//! Owns the driver state (init flag, channel table, per-channel runtime
//! flags) as an explicit value, so multiple engines can coexist and tests
//! can run against mock peripherals.
//!
//! Every precondition violation is a silent no-op; see
//! [`diag`](crate::pwm::diag) for the observability side channel.
//!
//! ## Interrupt context
//!
//! `init` and `deinit` belong to the main context only. Everything else
//! takes `&self` and may be called from a notification callback running
//! in interrupt context - including `enable_notification`, which handlers
//! use to re-arm themselves. No lock is taken on any of those paths; the
//! per-channel flags are atomics and register traffic goes through the
//! capability handle one word at a time.

use core::sync::atomic::{AtomicBool, Ordering};

use heapless::Vec;

use crate::platform::traits::{
    InterruptRouter, IrqPriority, OutputState, TimerEvent, TimerId, TimerPeripheral,
};
use crate::pwm::config::{ChannelClass, ChannelConfig, EdgeMask, PwmConfig, PWM_MAX_CHANNELS};
use crate::pwm::diag::{FaultCounters, FaultKind, FaultSnapshot};
use crate::{log_debug, log_warn};

/// Priority installed on every routed notification line.
const NOTIFICATION_PRIORITY: IrqPriority = IrqPriority(1);

/// Mutable per-channel state, created at `init` and dropped at `deinit`.
#[derive(Debug)]
struct ChannelRuntime {
    notification_active: AtomicBool,
}

impl ChannelRuntime {
    const fn new(active: bool) -> Self {
        Self {
            notification_active: AtomicBool::new(active),
        }
    }
}

/// The PWM channel control engine.
pub struct PwmEngine<'a> {
    initialized: bool,
    channels: &'a [ChannelConfig<'a>],
    runtime: Vec<ChannelRuntime, PWM_MAX_CHANNELS>,
    router: &'a dyn InterruptRouter,
    faults: FaultCounters,
}

/// `floor(period * duty / 32768)`, the Q15 duty-to-compare scaling.
///
/// The product needs 32 bits; the result is truncated to the 16-bit
/// compare register, which only matters for out-of-scale duty values.
fn scaled_compare(period: u16, duty_q15: u16) -> u16 {
    ((period as u32 * duty_q15 as u32) >> 15) as u16
}

/// True when no earlier table entry uses the same peripheral, i.e. this
/// entry is the one that owns per-peripheral work.
fn first_with_timer(channels: &[ChannelConfig<'_>], index: usize) -> bool {
    let id = channels[index].timer.id();
    channels[..index].iter().all(|ch| ch.timer.id() != id)
}

impl<'a> PwmEngine<'a> {
    /// Create an uninitialized engine bound to an interrupt router.
    pub const fn new(router: &'a dyn InterruptRouter) -> Self {
        Self {
            initialized: false,
            channels: &[],
            runtime: Vec::new(),
            router,
            faults: FaultCounters::new(),
        }
    }

    /// Initialize the driver from a channel configuration table.
    ///
    /// For each descriptor: enables the owning peripheral's clock domain
    /// (once per distinct peripheral), programs the reload and compare
    /// registers from the defaults, sets polarity, and enables the
    /// compare-unit output. Counters are started once per distinct
    /// peripheral after all of its channels are programmed.
    ///
    /// Calling `init` while already initialized, or with an empty table,
    /// is a no-op rather than an error - callers are allowed to init
    /// defensively. Tables longer than [`PWM_MAX_CHANNELS`] are rejected
    /// the same way.
    pub fn init(&mut self, config: &PwmConfig<'a>) {
        if self.initialized {
            return;
        }
        let channels = config.channels;
        if channels.is_empty() {
            return;
        }
        if channels.len() > PWM_MAX_CHANNELS {
            log_warn!("pwm: config exceeds channel cap, ignoring init");
            return;
        }

        for (i, ch) in channels.iter().enumerate() {
            if first_with_timer(channels, i) {
                ch.timer.enable_clock();
            }
            ch.timer.set_reload(ch.default_period);
            ch.timer.set_compare(ch.sub, ch.default_compare);
            ch.timer.set_polarity(ch.sub, ch.polarity);
            ch.timer.set_output_enabled(ch.sub, true);
            let _ = self.runtime.push(ChannelRuntime::new(ch.notification));
        }
        for (i, ch) in channels.iter().enumerate() {
            if first_with_timer(channels, i) {
                ch.timer.start();
            }
        }

        self.channels = channels;
        self.initialized = true;
        log_debug!("pwm: initialized {} channels", channels.len());
    }

    /// Tear the driver down.
    ///
    /// Safe from any state: when initialized, disables every configured
    /// compare-unit output and stops each distinct peripheral's counter;
    /// otherwise a no-op.
    pub fn deinit(&mut self) {
        if !self.initialized {
            return;
        }
        for ch in self.channels.iter() {
            ch.timer.set_output_enabled(ch.sub, false);
        }
        for (i, ch) in self.channels.iter().enumerate() {
            if first_with_timer(self.channels, i) {
                ch.timer.stop();
            }
        }
        self.channels = &[];
        self.runtime.clear();
        self.initialized = false;
        log_debug!("pwm: deinitialized");
    }

    /// Set a channel's duty cycle against its live period.
    ///
    /// `duty_q15` is an unsigned Q15 fraction (`0x0000` = 0%, `0x8000` =
    /// 100%). Values above full scale are passed through unclamped and
    /// yield a compare value beyond the period. The period itself is read
    /// from the live reload register, so a preceding `set_period_and_duty`
    /// is honored.
    pub fn set_duty_cycle(&self, index: usize, duty_q15: u16) {
        let Some(ch) = self.configured(index) else {
            return;
        };
        let period = ch.timer.reload();
        ch.timer.set_compare(ch.sub, scaled_compare(period, duty_q15));
    }

    /// Set a channel's period and duty cycle together.
    ///
    /// Only channels of class [`ChannelClass::VariablePeriod`] accept
    /// this; anything else is a no-op. The reload register is written
    /// before the compare register so the two never disagree for longer
    /// than the hardware's own reload race.
    pub fn set_period_and_duty(&self, index: usize, period: u16, duty_q15: u16) {
        let Some(ch) = self.configured(index) else {
            return;
        };
        if ch.class != ChannelClass::VariablePeriod {
            self.faults.record(FaultKind::UnsupportedOperationForClass);
            return;
        }
        ch.timer.set_reload(period);
        ch.timer.set_compare(ch.sub, scaled_compare(period, duty_q15));
    }

    /// Force a channel's output to its idle level by zeroing the compare
    /// register. The stored period and the notification state are left
    /// untouched.
    pub fn set_output_to_idle(&self, index: usize) {
        let Some(ch) = self.configured(index) else {
            return;
        };
        ch.timer.set_compare(ch.sub, 0);
    }

    /// Current output state of a channel.
    ///
    /// Reports the compare unit's output-enable bit, not the momentary
    /// waveform level: `High` when the output stage is enabled, `Low`
    /// otherwise (and for any rejected call).
    pub fn output_state(&self, index: usize) -> OutputState {
        match self.configured(index) {
            Some(ch) if ch.timer.output_enabled(ch.sub) => OutputState::High,
            _ => OutputState::Low,
        }
    }

    /// Enable notification for a channel on the given edges.
    ///
    /// The index is bounded by [`PWM_MAX_CHANNELS`], the fixed table cap,
    /// not by the configured channel count (the two bounds are
    /// deliberately distinct; an index past the configured count is still
    /// a no-op). `RISING` enables the channel's compare-match source;
    /// `FALLING` enables the peripheral-wide update source, which is
    /// shared by every channel on that peripheral. Finally the
    /// peripheral's interrupt line is resolved and given a fixed
    /// priority; peripherals without a routable line are skipped while
    /// their source bits stay set.
    ///
    /// May be called from a notification callback to re-arm.
    pub fn enable_notification(&self, index: usize, edges: EdgeMask) {
        if index >= PWM_MAX_CHANNELS {
            self.faults.record(FaultKind::InvalidChannelIndex);
            return;
        }
        let Some(ch) = self.channels.get(index) else {
            self.faults.record(FaultKind::InvalidChannelIndex);
            return;
        };
        let Some(rt) = self.runtime.get(index) else {
            return;
        };

        rt.notification_active.store(true, Ordering::Relaxed);
        if edges.contains(EdgeMask::RISING) {
            ch.timer.set_event_irq(TimerEvent::CompareMatch(ch.sub), true);
        }
        if edges.contains(EdgeMask::FALLING) {
            ch.timer.set_event_irq(TimerEvent::Update, true);
        }

        match self.router.line_for(ch.timer.id()) {
            Some(line) => self.router.install(line, NOTIFICATION_PRIORITY),
            None => {
                self.faults.record(FaultKind::NoCallbackRoute);
                log_warn!("pwm: no irq line for timer {}", ch.timer.id().0);
            }
        }
    }

    /// Disable the compare-match notification source for a channel.
    ///
    /// Deliberately not the inverse of [`enable_notification`]: the
    /// shared update source stays enabled (other channels on the
    /// peripheral may depend on it) and the channel's notification flag
    /// is not cleared.
    ///
    /// [`enable_notification`]: PwmEngine::enable_notification
    pub fn disable_notification(&self, index: usize) {
        let Some(ch) = self.configured(index) else {
            return;
        };
        ch.timer.set_event_irq(TimerEvent::CompareMatch(ch.sub), false);
    }

    /// Dispatch a hardware timer event to channel callbacks.
    ///
    /// Call from the interrupt handler serving `timer`, after reading the
    /// hardware's event flags. A compare-match reaches the one channel on
    /// that compare unit; an update event fans out to every channel on
    /// the peripheral, since the source is shared. Only channels with an
    /// active notification and a configured callback are invoked.
    pub fn handle_interrupt(&self, timer: TimerId, event: TimerEvent) {
        for (ch, rt) in self.channels.iter().zip(self.runtime.iter()) {
            if ch.timer.id() != timer {
                continue;
            }
            let hit = match event {
                TimerEvent::CompareMatch(sub) => ch.sub == sub,
                TimerEvent::Update => true,
            };
            if hit && rt.notification_active.load(Ordering::Relaxed) {
                if let Some(callback) = ch.callback {
                    callback();
                }
            }
        }
    }

    /// Current notification flag of a channel (false for any invalid
    /// index or uninitialized driver).
    pub fn notification_enabled(&self, index: usize) -> bool {
        self.runtime
            .get(index)
            .map(|rt| rt.notification_active.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Whether the engine is between `init` and `deinit`.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of configured channels (0 when uninitialized).
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Snapshot of the fault counters.
    pub fn faults(&self) -> FaultSnapshot {
        self.faults.snapshot()
    }

    /// Common guard: initialized driver and index within the configured
    /// count. Records the fault and yields `None` on violation.
    fn configured(&self, index: usize) -> Option<&ChannelConfig<'a>> {
        if !self.initialized {
            self.faults.record(FaultKind::NotInitialized);
            return None;
        }
        match self.channels.get(index) {
            Some(ch) => Some(ch),
            None => {
                self.faults.record(FaultKind::InvalidChannelIndex);
                None
            }
        }
    }
}
