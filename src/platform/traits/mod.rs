//! Capability traits
//!
//! This module defines the traits target implementations must provide.

pub mod irq;
pub mod timer;

// Re-export trait interfaces
pub use irq::{InterruptRouter, IrqLine, IrqPriority};
pub use timer::{OutputState, SubChannel, TimerEvent, TimerId, TimerPeripheral};
