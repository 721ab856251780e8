//! Fault diagnostics
//!
//! The public engine API is fail-silent: a precondition violation is a
//! no-op, never an error value. These counters are the side channel that
//! makes rejected calls observable without changing that contract.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Reasons the engine silently rejects a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Channel index outside the valid bound for the operation.
    InvalidChannelIndex,
    /// Operation before `init` or after `deinit`.
    NotInitialized,
    /// Period change requested on a fixed-period channel.
    UnsupportedOperationForClass,
    /// Notification enabled on a peripheral with no routable interrupt
    /// line; the source bits are still set.
    NoCallbackRoute,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChannelIndex => write!(f, "invalid channel index"),
            Self::NotInitialized => write!(f, "driver not initialized"),
            Self::UnsupportedOperationForClass => write!(f, "operation unsupported for channel class"),
            Self::NoCallbackRoute => write!(f, "no interrupt route for peripheral"),
        }
    }
}

/// Per-engine fault counters.
///
/// Relaxed atomics: counts may be bumped from interrupt context while the
/// main context reads a snapshot, and an off-by-one view is acceptable.
#[derive(Debug, Default)]
pub struct FaultCounters {
    invalid_index: AtomicU32,
    not_initialized: AtomicU32,
    class_mismatch: AtomicU32,
    unrouted: AtomicU32,
}

impl FaultCounters {
    pub const fn new() -> Self {
        Self {
            invalid_index: AtomicU32::new(0),
            not_initialized: AtomicU32::new(0),
            class_mismatch: AtomicU32::new(0),
            unrouted: AtomicU32::new(0),
        }
    }

    pub fn record(&self, kind: FaultKind) {
        let counter = match kind {
            FaultKind::InvalidChannelIndex => &self.invalid_index,
            FaultKind::NotInitialized => &self.not_initialized,
            FaultKind::UnsupportedOperationForClass => &self.class_mismatch,
            FaultKind::NoCallbackRoute => &self.unrouted,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            invalid_index: self.invalid_index.load(Ordering::Relaxed),
            not_initialized: self.not_initialized.load(Ordering::Relaxed),
            class_mismatch: self.class_mismatch.load(Ordering::Relaxed),
            unrouted: self.unrouted.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the fault counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultSnapshot {
    pub invalid_index: u32,
    pub not_initialized: u32,
    pub class_mismatch: u32,
    pub unrouted: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate_per_kind() {
        let faults = FaultCounters::new();
        faults.record(FaultKind::InvalidChannelIndex);
        faults.record(FaultKind::InvalidChannelIndex);
        faults.record(FaultKind::NoCallbackRoute);

        let snap = faults.snapshot();
        assert_eq!(snap.invalid_index, 2);
        assert_eq!(snap.unrouted, 1);
        assert_eq!(snap.not_initialized, 0);
        assert_eq!(snap.class_mismatch, 0);
    }

    #[test]
    fn test_display_names_the_fault() {
        let msg = format!("{}", FaultKind::UnsupportedOperationForClass);
        assert_eq!(msg, "operation unsupported for channel class");
    }
}
