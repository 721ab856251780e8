//! Hardware capability layer
//!
//! This module defines the capability traits the PWM engine programs
//! hardware through. Target crates implement them over their timer and
//! interrupt-controller registers; the in-crate mocks implement them over
//! plain memory for tests.

pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use traits::{
    InterruptRouter, IrqLine, IrqPriority, OutputState, SubChannel, TimerEvent, TimerId,
    TimerPeripheral,
};
