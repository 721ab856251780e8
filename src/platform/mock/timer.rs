//! Mock timer implementation for testing

use core::cell::Cell;

use crate::platform::traits::{OutputState, SubChannel, TimerEvent, TimerId, TimerPeripheral};

/// Mock timer peripheral
///
/// Models the register file of one four-channel timer in plain memory so
/// tests can assert exactly what the engine wrote. Call counters for
/// clock enable and counter start/stop let tests verify per-peripheral
/// deduplication.
#[derive(Debug)]
pub struct MockTimer {
    id: TimerId,
    reload: Cell<u16>,
    compare: [Cell<u16>; 4],
    polarity: [Cell<OutputState>; 4],
    output_enabled: [Cell<bool>; 4],
    running: Cell<bool>,
    cc_irq: [Cell<bool>; 4],
    update_irq: Cell<bool>,
    clock_enables: Cell<u8>,
    starts: Cell<u8>,
    stops: Cell<u8>,
}

impl MockTimer {
    /// Create a mock timer with all registers at reset values.
    pub fn new(id: TimerId) -> Self {
        Self {
            id,
            reload: Cell::new(0),
            compare: core::array::from_fn(|_| Cell::new(0)),
            polarity: core::array::from_fn(|_| Cell::new(OutputState::High)),
            output_enabled: core::array::from_fn(|_| Cell::new(false)),
            running: Cell::new(false),
            cc_irq: core::array::from_fn(|_| Cell::new(false)),
            update_irq: Cell::new(false),
            clock_enables: Cell::new(0),
            starts: Cell::new(0),
            stops: Cell::new(0),
        }
    }

    /// Is the counter currently running?
    pub fn running(&self) -> bool {
        self.running.get()
    }

    /// Configured polarity of a compare unit.
    pub fn polarity(&self, sub: SubChannel) -> OutputState {
        self.polarity[sub.index()].get()
    }

    /// Is the interrupt source for an event enabled?
    pub fn event_irq_enabled(&self, event: TimerEvent) -> bool {
        match event {
            TimerEvent::CompareMatch(sub) => self.cc_irq[sub.index()].get(),
            TimerEvent::Update => self.update_irq.get(),
        }
    }

    /// How many times the clock domain was enabled.
    pub fn clock_enable_count(&self) -> u8 {
        self.clock_enables.get()
    }

    /// How many times the counter was started.
    pub fn start_count(&self) -> u8 {
        self.starts.get()
    }

    /// How many times the counter was stopped.
    pub fn stop_count(&self) -> u8 {
        self.stops.get()
    }
}

impl TimerPeripheral for MockTimer {
    fn id(&self) -> TimerId {
        self.id
    }

    fn enable_clock(&self) {
        self.clock_enables.set(self.clock_enables.get().wrapping_add(1));
    }

    fn start(&self) {
        self.running.set(true);
        self.starts.set(self.starts.get().wrapping_add(1));
    }

    fn stop(&self) {
        self.running.set(false);
        self.stops.set(self.stops.get().wrapping_add(1));
    }

    fn set_reload(&self, ticks: u16) {
        self.reload.set(ticks);
    }

    fn reload(&self) -> u16 {
        self.reload.get()
    }

    fn set_compare(&self, sub: SubChannel, ticks: u16) {
        self.compare[sub.index()].set(ticks);
    }

    fn compare(&self, sub: SubChannel) -> u16 {
        self.compare[sub.index()].get()
    }

    fn set_polarity(&self, sub: SubChannel, polarity: OutputState) {
        self.polarity[sub.index()].set(polarity);
    }

    fn set_output_enabled(&self, sub: SubChannel, enabled: bool) {
        self.output_enabled[sub.index()].set(enabled);
    }

    fn output_enabled(&self, sub: SubChannel) -> bool {
        self.output_enabled[sub.index()].get()
    }

    fn set_event_irq(&self, event: TimerEvent, enabled: bool) {
        match event {
            TimerEvent::CompareMatch(sub) => self.cc_irq[sub.index()].set(enabled),
            TimerEvent::Update => self.update_irq.set(enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_start_at_reset_values() {
        let timer = MockTimer::new(TimerId(2));
        assert_eq!(timer.id(), TimerId(2));
        assert_eq!(timer.reload(), 0);
        for sub in SubChannel::ALL {
            assert_eq!(timer.compare(sub), 0);
            assert!(!timer.output_enabled(sub));
            assert!(!timer.event_irq_enabled(TimerEvent::CompareMatch(sub)));
        }
        assert!(!timer.running());
        assert!(!timer.event_irq_enabled(TimerEvent::Update));
    }

    #[test]
    fn test_compare_units_are_independent() {
        let timer = MockTimer::new(TimerId(0));
        timer.set_compare(SubChannel::Sub2, 500);
        assert_eq!(timer.compare(SubChannel::Sub2), 500);
        assert_eq!(timer.compare(SubChannel::Sub1), 0);
        assert_eq!(timer.compare(SubChannel::Sub3), 0);
    }

    #[test]
    fn test_call_counters_track_lifecycle() {
        let timer = MockTimer::new(TimerId(0));
        timer.enable_clock();
        timer.start();
        timer.start();
        timer.stop();
        assert_eq!(timer.clock_enable_count(), 1);
        assert_eq!(timer.start_count(), 2);
        assert_eq!(timer.stop_count(), 1);
        assert!(!timer.running());
    }

    #[test]
    fn test_update_irq_is_peripheral_wide() {
        let timer = MockTimer::new(TimerId(0));
        timer.set_event_irq(TimerEvent::Update, true);
        assert!(timer.event_irq_enabled(TimerEvent::Update));
        for sub in SubChannel::ALL {
            assert!(!timer.event_irq_enabled(TimerEvent::CompareMatch(sub)));
        }
    }
}
